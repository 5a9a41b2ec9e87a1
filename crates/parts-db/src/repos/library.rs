//! Library and footprint-node repository. Both are identified by a unique
//! `reference` and carry a storage `path`.

use parts_core::entities::{DEFAULT_FNODE_PATH, DEFAULT_LIBRARY_PATH, FNode, Library};
use parts_core::enums::{EntityKind, MembershipKind};

use crate::error::{DatabaseError, on};
use crate::service::PartsService;

fn validate_reference(reference: &str) -> Result<(), DatabaseError> {
    if reference.trim().is_empty() {
        return Err(DatabaseError::validation("reference must not be empty"));
    }
    Ok(())
}

impl PartsService {
    /// Register a library. `path` defaults to `"Some Library"`.
    pub async fn create_library(
        &self,
        reference: &str,
        path: Option<&str>,
    ) -> Result<Library, DatabaseError> {
        validate_reference(reference)?;
        let path = path.unwrap_or(DEFAULT_LIBRARY_PATH);

        let w = self.begin_write().await?;
        let result: Result<Library, DatabaseError> = async {
            w.conn()
                .execute(
                    "INSERT INTO libraries (reference, path) VALUES (?1, ?2)",
                    libsql::params![reference, path],
                )
                .await
                .map_err(on(EntityKind::Library))?;
            Ok(Library {
                id: w.conn().last_insert_rowid(),
                reference: reference.to_string(),
                path: path.to_string(),
            })
        }
        .await;
        let library = w.finish(result).await?;

        tracing::debug!(id = library.id, reference, "library created");
        Ok(library)
    }

    pub async fn get_library(&self, id: i64) -> Result<Library, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query("SELECT id, reference, path FROM libraries WHERE id = ?1", [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityKind::Library, id))?;
        Ok(Library {
            id: row.get::<i64>(0)?,
            reference: row.get::<String>(1)?,
            path: row.get::<String>(2)?,
        })
    }

    pub async fn list_libraries(&self, limit: u32) -> Result<Vec<Library>, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, reference, path FROM libraries ORDER BY reference LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;

        let mut libraries = Vec::new();
        while let Some(row) = rows.next().await? {
            libraries.push(Library {
                id: row.get::<i64>(0)?,
                reference: row.get::<String>(1)?,
                path: row.get::<String>(2)?,
            });
        }
        Ok(libraries)
    }

    /// Register a footprint node. `path` defaults to `"Some FNode"`.
    pub async fn create_fnode(
        &self,
        reference: &str,
        path: Option<&str>,
    ) -> Result<FNode, DatabaseError> {
        validate_reference(reference)?;
        let path = path.unwrap_or(DEFAULT_FNODE_PATH);

        let w = self.begin_write().await?;
        let result: Result<FNode, DatabaseError> = async {
            w.conn()
                .execute(
                    "INSERT INTO f_nodes (reference, path) VALUES (?1, ?2)",
                    libsql::params![reference, path],
                )
                .await
                .map_err(on(EntityKind::FNode))?;
            Ok(FNode {
                id: w.conn().last_insert_rowid(),
                reference: reference.to_string(),
                path: path.to_string(),
            })
        }
        .await;
        let fnode = w.finish(result).await?;

        tracing::debug!(id = fnode.id, reference, "fnode created");
        Ok(fnode)
    }

    pub async fn get_fnode(&self, id: i64) -> Result<FNode, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query("SELECT id, reference, path FROM f_nodes WHERE id = ?1", [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityKind::FNode, id))?;
        Ok(FNode {
            id: row.get::<i64>(0)?,
            reference: row.get::<String>(1)?,
            path: row.get::<String>(2)?,
        })
    }

    /// Delete a footprint node, first removing it from every component it is
    /// attached to and renumbering the remaining siblings.
    pub async fn delete_fnode(&self, id: i64) -> Result<(), DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            super::membership::detach_child(w.conn(), MembershipKind::FNode, id).await?;
            let affected = w
                .conn()
                .execute("DELETE FROM f_nodes WHERE id = ?1", [id])
                .await
                .map_err(on(EntityKind::FNode))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(EntityKind::FNode, id));
            }
            Ok(())
        }
        .await;
        w.finish(result).await?;

        tracing::debug!(id, "fnode deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn library_defaults_path() {
        let svc = test_service().await;
        let lib = svc.create_library("lib:Passives", None).await.unwrap();
        assert_eq!(lib.path, DEFAULT_LIBRARY_PATH);
        assert_eq!(svc.get_library(lib.id).await.unwrap(), lib);
    }

    #[tokio::test]
    async fn library_reference_is_unique() {
        let svc = test_service().await;
        svc.create_library("lib:R", Some("/libs/r")).await.unwrap();
        let err = svc.create_library("lib:R", None).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(svc.list_libraries(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fnode_roundtrip_and_delete() {
        let svc = test_service().await;
        let node = svc.create_fnode("fp:0603", None).await.unwrap();
        assert_eq!(node.path, DEFAULT_FNODE_PATH);
        assert_eq!(svc.get_fnode(node.id).await.unwrap(), node);

        svc.delete_fnode(node.id).await.unwrap();
        assert!(svc.get_fnode(node.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn blank_reference_rejected() {
        let svc = test_service().await;
        assert!(svc.create_fnode(" ", None).await.unwrap_err().is_validation());
    }
}
