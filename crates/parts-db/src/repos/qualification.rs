//! Annotated qualification repository: a qualification held by a component,
//! with an optional free-text annotation.

use parts_core::entities::AnnotatedQualification;
use parts_core::enums::EntityKind;

use crate::error::{DatabaseError, on};
use crate::helpers::get_opt_string;
use crate::service::PartsService;

fn row_to_annotated(row: &libsql::Row) -> Result<AnnotatedQualification, DatabaseError> {
    Ok(AnnotatedQualification {
        id: row.get::<i64>(0)?,
        component_id: row.get::<i64>(1)?,
        qualification_id: row.get::<i64>(2)?,
        annotation: get_opt_string(row, 3)?,
    })
}

impl PartsService {
    /// Record that `component_id` holds `qualification_id`.
    pub async fn annotate_qualification(
        &self,
        component_id: i64,
        qualification_id: i64,
        annotation: Option<&str>,
    ) -> Result<AnnotatedQualification, DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<AnnotatedQualification, DatabaseError> = async {
            w.conn()
                .execute(
                    "INSERT INTO annotated_qualifications (component_id, qualification_id, annotation) \
                     VALUES (?1, ?2, ?3)",
                    libsql::params![component_id, qualification_id, annotation],
                )
                .await
                .map_err(on(EntityKind::AnnotatedQualification))?;
            Ok(AnnotatedQualification {
                id: w.conn().last_insert_rowid(),
                component_id,
                qualification_id,
                annotation: annotation.map(String::from),
            })
        }
        .await;
        let annotated = w.finish(result).await?;

        tracing::debug!(
            id = annotated.id,
            component_id,
            qualification_id,
            "qualification annotated"
        );
        Ok(annotated)
    }

    pub async fn list_annotated_qualifications(
        &self,
        component_id: i64,
    ) -> Result<Vec<AnnotatedQualification>, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, component_id, qualification_id, annotation \
                 FROM annotated_qualifications WHERE component_id = ?1 ORDER BY id",
                [component_id],
            )
            .await?;

        let mut annotated = Vec::new();
        while let Some(row) = rows.next().await? {
            annotated.push(row_to_annotated(&row)?);
        }
        Ok(annotated)
    }

    /// Remove an annotated qualification and the reviews attached to it.
    pub async fn remove_annotated_qualification(&self, id: i64) -> Result<(), DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            let affected = w
                .conn()
                .execute("DELETE FROM annotated_qualifications WHERE id = ?1", [id])
                .await
                .map_err(on(EntityKind::AnnotatedQualification))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(EntityKind::AnnotatedQualification, id));
            }
            Ok(())
        }
        .await;
        w.finish(result).await?;

        tracing::debug!(id, "annotated qualification removed");
        Ok(())
    }
}
