//! Review repository. A review signs off either a whole component or one of
//! its annotated qualifications; its date is set once at creation.

use chrono::{DateTime, Utc};
use parts_core::audit::stamp_once;
use parts_core::entities::Review;
use parts_core::enums::EntityKind;

use crate::error::{DatabaseError, on};
use crate::helpers::{format_datetime, parse_datetime};
use crate::service::PartsService;

/// What a review is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    Component(i64),
    AnnotatedQualification(i64),
}

fn row_to_review(row: &libsql::Row) -> Result<Review, DatabaseError> {
    Ok(Review {
        id: row.get::<i64>(0)?,
        component_id: row.get::<Option<i64>>(1)?,
        annotated_qualification_id: row.get::<Option<i64>>(2)?,
        reviewer_id: row.get::<i64>(3)?,
        date: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl PartsService {
    /// Record a review by `reviewer_id`. `date` defaults to now.
    pub async fn create_review(
        &self,
        reviewer_id: i64,
        target: ReviewTarget,
        date: Option<DateTime<Utc>>,
    ) -> Result<Review, DatabaseError> {
        let (component_id, annotated_qualification_id) = match target {
            ReviewTarget::Component(id) => (Some(id), None),
            ReviewTarget::AnnotatedQualification(id) => (None, Some(id)),
        };

        let w = self.begin_write().await?;
        let date = stamp_once(date, self.now());
        let result: Result<Review, DatabaseError> = async {
            w.conn()
                .execute(
                    "INSERT INTO reviews (component_id, annotated_qualification_id, reviewer_id, date) \
                     VALUES (?1, ?2, ?3, ?4)",
                    libsql::params![
                        component_id,
                        annotated_qualification_id,
                        reviewer_id,
                        format_datetime(&date)
                    ],
                )
                .await
                .map_err(on(EntityKind::Review))?;
            Ok(Review {
                id: w.conn().last_insert_rowid(),
                component_id,
                annotated_qualification_id,
                reviewer_id,
                date,
            })
        }
        .await;
        let review = w.finish(result).await?;

        tracing::debug!(id = review.id, reviewer_id, ?target, "review recorded");
        Ok(review)
    }

    /// Reviews of a component and of its annotated qualifications, newest first.
    pub async fn list_reviews_for_component(
        &self,
        component_id: i64,
    ) -> Result<Vec<Review>, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, component_id, annotated_qualification_id, reviewer_id, date \
                 FROM reviews \
                 WHERE component_id = ?1 \
                    OR annotated_qualification_id IN \
                       (SELECT id FROM annotated_qualifications WHERE component_id = ?1) \
                 ORDER BY date DESC, id DESC",
                [component_id],
            )
            .await?;

        let mut reviews = Vec::new();
        while let Some(row) = rows.next().await? {
            reviews.push(row_to_review(&row)?);
        }
        Ok(reviews)
    }

    pub async fn delete_review(&self, id: i64) -> Result<(), DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            let affected = w
                .conn()
                .execute("DELETE FROM reviews WHERE id = ?1", [id])
                .await
                .map_err(on(EntityKind::Review))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(EntityKind::Review, id));
            }
            Ok(())
        }
        .await;
        w.finish(result).await?;

        tracing::debug!(id, "review deleted");
        Ok(())
    }
}
