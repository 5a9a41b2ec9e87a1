//! Web entity repository: companies and links, unique by `(name, url)`.

use parts_core::entities::{DEFAULT_NAME, WebEntity};
use parts_core::enums::{MembershipKind, WebKind};

use crate::error::{DatabaseError, on};
use crate::helpers::web_table;
use crate::service::PartsService;
use crate::updates::web::WebEntityUpdate;

fn row_to_web(kind: WebKind, row: &libsql::Row) -> Result<WebEntity, DatabaseError> {
    Ok(WebEntity {
        id: row.get::<i64>(0)?,
        kind,
        name: row.get::<String>(1)?,
        url: row.get::<String>(2)?,
    })
}

fn validate_url(url: &str) -> Result<(), DatabaseError> {
    if url.is_empty() {
        return Err(DatabaseError::validation("url must not be empty"));
    }
    Ok(())
}

pub(crate) async fn fetch_web(
    conn: &libsql::Connection,
    kind: WebKind,
    id: i64,
) -> Result<WebEntity, DatabaseError> {
    let sql = format!("SELECT id, name, url FROM {} WHERE id = ?1", web_table(kind));
    let mut rows = conn.query(&sql, [id]).await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found(kind.entity(), id))?;
    row_to_web(kind, &row)
}

impl PartsService {
    /// Create a company or link. An empty `name` becomes `"MyName"`. Fails
    /// with `Duplicate` if the `(name, url)` pair already exists for this kind.
    pub async fn create_web_entity(
        &self,
        kind: WebKind,
        name: &str,
        url: &str,
    ) -> Result<WebEntity, DatabaseError> {
        validate_url(url)?;
        let name = if name.is_empty() { DEFAULT_NAME } else { name };

        let w = self.begin_write().await?;
        let result: Result<WebEntity, DatabaseError> = async {
            let sql = format!("INSERT INTO {} (name, url) VALUES (?1, ?2)", web_table(kind));
            w.conn()
                .execute(&sql, libsql::params![name, url])
                .await
                .map_err(on(kind.entity()))?;
            Ok(WebEntity {
                id: w.conn().last_insert_rowid(),
                kind,
                name: name.to_string(),
                url: url.to_string(),
            })
        }
        .await;
        let entity = w.finish(result).await?;

        tracing::debug!(kind = kind.as_str(), id = entity.id, name, url, "web entity created");
        Ok(entity)
    }

    pub async fn get_web_entity(&self, kind: WebKind, id: i64) -> Result<WebEntity, DatabaseError> {
        let _gate = self.read().await;
        fetch_web(self.db().conn(), kind, id).await
    }

    pub async fn list_web_entities(
        &self,
        kind: WebKind,
        limit: u32,
    ) -> Result<Vec<WebEntity>, DatabaseError> {
        let _gate = self.read().await;
        let sql = format!(
            "SELECT id, name, url FROM {} ORDER BY name, url LIMIT ?1",
            web_table(kind)
        );
        let mut rows = self.db().conn().query(&sql, [i64::from(limit)]).await?;

        let mut entities = Vec::new();
        while let Some(row) = rows.next().await? {
            entities.push(row_to_web(kind, &row)?);
        }
        Ok(entities)
    }

    /// Rename or re-point a web entity. The `(name, url)` pair stays unique.
    pub async fn update_web_entity(
        &self,
        kind: WebKind,
        id: i64,
        update: WebEntityUpdate,
    ) -> Result<WebEntity, DatabaseError> {
        if let Some(url) = &update.url {
            validate_url(url)?;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.as_str().into());
            idx += 1;
        }
        if let Some(ref url) = update.url {
            sets.push(format!("url = ?{idx}"));
            params.push(url.as_str().into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_web_entity(kind, id).await;
        }

        params.push(id.into());
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{idx}",
            web_table(kind),
            sets.join(", ")
        );

        let w = self.begin_write().await?;
        let result: Result<WebEntity, DatabaseError> = async {
            let affected = w
                .conn()
                .execute(&sql, libsql::params_from_iter(params))
                .await
                .map_err(on(kind.entity()))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(kind.entity(), id));
            }
            fetch_web(w.conn(), kind, id).await
        }
        .await;
        let entity = w.finish(result).await?;

        tracing::debug!(kind = kind.as_str(), id, "web entity updated");
        Ok(entity)
    }

    /// Delete a web entity.
    ///
    /// A link's memberships are removed first, closing the gap in each parent's
    /// order. A company still referenced as a manufacturer is refused with
    /// `ReferentialIntegrity`.
    pub async fn delete_web_entity(&self, kind: WebKind, id: i64) -> Result<(), DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            if kind == WebKind::Link {
                super::membership::detach_child(w.conn(), MembershipKind::Link, id).await?;
            }
            let sql = format!("DELETE FROM {} WHERE id = ?1", web_table(kind));
            let affected = w
                .conn()
                .execute(&sql, [id])
                .await
                .map_err(on(kind.entity()))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(kind.entity(), id));
            }
            Ok(())
        }
        .await;
        w.finish(result).await?;

        tracing::debug!(kind = kind.as_str(), id, "web entity deleted");
        Ok(())
    }
}
