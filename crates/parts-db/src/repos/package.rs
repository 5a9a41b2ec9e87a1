use parts_core::entities::{DEFAULT_NAME, Package};
use parts_core::enums::EntityKind;

use crate::error::{DatabaseError, on};
use crate::helpers::get_opt_string;
use crate::service::PartsService;

fn row_to_package(row: &libsql::Row) -> Result<Package, DatabaseError> {
    Ok(Package {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        description: get_opt_string(row, 2)?,
    })
}

impl PartsService {
    pub async fn create_package(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Package, DatabaseError> {
        let name = if name.is_empty() { DEFAULT_NAME } else { name };

        let w = self.begin_write().await?;
        let result: Result<Package, DatabaseError> = async {
            w.conn()
                .execute(
                    "INSERT INTO packages (name, description) VALUES (?1, ?2)",
                    libsql::params![name, description],
                )
                .await
                .map_err(on(EntityKind::Package))?;
            Ok(Package {
                id: w.conn().last_insert_rowid(),
                name: name.to_string(),
                description: description.map(String::from),
            })
        }
        .await;
        let package = w.finish(result).await?;

        tracing::debug!(id = package.id, name, "package created");
        Ok(package)
    }

    pub async fn get_package(&self, id: i64) -> Result<Package, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query("SELECT id, name, description FROM packages WHERE id = ?1", [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityKind::Package, id))?;
        row_to_package(&row)
    }

    pub async fn list_packages(&self, limit: u32) -> Result<Vec<Package>, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, description FROM packages ORDER BY name LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;

        let mut packages = Vec::new();
        while let Some(row) = rows.next().await? {
            packages.push(row_to_package(&row)?);
        }
        Ok(packages)
    }

    /// Delete a package. Refused while a component is still in it.
    pub async fn delete_package(&self, id: i64) -> Result<(), DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            let affected = w
                .conn()
                .execute("DELETE FROM packages WHERE id = ?1", [id])
                .await
                .map_err(on(EntityKind::Package))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(EntityKind::Package, id));
            }
            Ok(())
        }
        .await;
        w.finish(result).await?;

        tracing::debug!(id, "package deleted");
        Ok(())
    }
}
