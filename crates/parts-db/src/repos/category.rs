//! Category and tag repository.
//!
//! A category classifies one entity kind (its content type) and owns a set of
//! tags. Category names are unique per content type, tag names per category.

use parts_core::entities::{Category, Tag};
use parts_core::enums::EntityKind;

use crate::error::{DatabaseError, on};
use crate::helpers::{get_opt_string, parse_enum};
use crate::service::PartsService;

fn row_to_category(row: &libsql::Row) -> Result<Category, DatabaseError> {
    Ok(Category {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        description: get_opt_string(row, 2)?,
        content_type: parse_enum(&row.get::<String>(3)?)?,
    })
}

fn row_to_tag(row: &libsql::Row) -> Result<Tag, DatabaseError> {
    Ok(Tag {
        id: row.get::<i64>(0)?,
        category_id: row.get::<i64>(1)?,
        name: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
    })
}

fn validate_name(name: &str) -> Result<(), DatabaseError> {
    if name.trim().is_empty() {
        return Err(DatabaseError::validation("name must not be empty"));
    }
    Ok(())
}

impl PartsService {
    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
        content_type: EntityKind,
    ) -> Result<Category, DatabaseError> {
        validate_name(name)?;

        let w = self.begin_write().await?;
        let result: Result<Category, DatabaseError> = async {
            w.conn()
                .execute(
                    "INSERT INTO categories (name, description, content_type) VALUES (?1, ?2, ?3)",
                    libsql::params![name, description, content_type.as_str()],
                )
                .await
                .map_err(on(EntityKind::Category))?;
            Ok(Category {
                id: w.conn().last_insert_rowid(),
                name: name.to_string(),
                description: description.map(String::from),
                content_type,
            })
        }
        .await;
        let category = w.finish(result).await?;

        tracing::debug!(id = category.id, name, content_type = content_type.as_str(), "category created");
        Ok(category)
    }

    /// Categories, optionally only those classifying `content_type`.
    pub async fn list_categories(
        &self,
        content_type: Option<EntityKind>,
    ) -> Result<Vec<Category>, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = match content_type {
            Some(kind) => {
                self.db()
                    .conn()
                    .query(
                        "SELECT id, name, description, content_type FROM categories \
                         WHERE content_type = ?1 ORDER BY name",
                        [kind.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        "SELECT id, name, description, content_type FROM categories \
                         ORDER BY content_type, name",
                        (),
                    )
                    .await?
            }
        };

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(row_to_category(&row)?);
        }
        Ok(categories)
    }

    /// Delete a category and every tag in it.
    pub async fn delete_category(&self, id: i64) -> Result<(), DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            let affected = w
                .conn()
                .execute("DELETE FROM categories WHERE id = ?1", [id])
                .await
                .map_err(on(EntityKind::Category))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(EntityKind::Category, id));
            }
            Ok(())
        }
        .await;
        w.finish(result).await?;

        tracing::debug!(id, "category deleted");
        Ok(())
    }

    pub async fn create_tag(
        &self,
        category_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Tag, DatabaseError> {
        validate_name(name)?;

        let w = self.begin_write().await?;
        let result: Result<Tag, DatabaseError> = async {
            w.conn()
                .execute(
                    "INSERT INTO tags (category_id, name, description) VALUES (?1, ?2, ?3)",
                    libsql::params![category_id, name, description],
                )
                .await
                .map_err(on(EntityKind::Tag))?;
            Ok(Tag {
                id: w.conn().last_insert_rowid(),
                category_id,
                name: name.to_string(),
                description: description.map(String::from),
            })
        }
        .await;
        let tag = w.finish(result).await?;

        tracing::debug!(id = tag.id, category_id, name, "tag created");
        Ok(tag)
    }

    pub async fn list_tags(&self, category_id: i64) -> Result<Vec<Tag>, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, category_id, name, description FROM tags \
                 WHERE category_id = ?1 ORDER BY name",
                [category_id],
            )
            .await?;

        let mut tags = Vec::new();
        while let Some(row) = rows.next().await? {
            tags.push(row_to_tag(&row)?);
        }
        Ok(tags)
    }
}
