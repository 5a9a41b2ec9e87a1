//! Lookup repository: types, qualifications, mounting types and lifecycle
//! states. One table per kind, `name` unique within it.

use parts_core::entities::{DEFAULT_NAME, Lookup};
use parts_core::enums::LookupKind;

use crate::error::{DatabaseError, on};
use crate::helpers::{get_opt_string, lookup_table};
use crate::service::PartsService;
use crate::updates::lookup::LookupUpdate;

fn row_to_lookup(kind: LookupKind, row: &libsql::Row) -> Result<Lookup, DatabaseError> {
    Ok(Lookup {
        id: row.get::<i64>(0)?,
        kind,
        name: row.get::<String>(1)?,
        description: get_opt_string(row, 2)?,
        full_name: get_opt_string(row, 3)?,
    })
}

pub(crate) async fn fetch_lookup(
    conn: &libsql::Connection,
    kind: LookupKind,
    id: i64,
) -> Result<Lookup, DatabaseError> {
    let sql = format!(
        "SELECT id, name, description, full_name FROM {} WHERE id = ?1",
        lookup_table(kind)
    );
    let mut rows = conn.query(&sql, [id]).await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found(kind.entity(), id))?;
    row_to_lookup(kind, &row)
}

impl PartsService {
    /// Create a lookup row. An empty `name` falls back to `"MyName"`.
    pub async fn create_lookup(
        &self,
        kind: LookupKind,
        name: &str,
        description: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<Lookup, DatabaseError> {
        let name = if name.is_empty() { DEFAULT_NAME } else { name };

        let w = self.begin_write().await?;
        let result: Result<Lookup, DatabaseError> = async {
            let sql = format!(
                "INSERT INTO {} (name, description, full_name) VALUES (?1, ?2, ?3)",
                lookup_table(kind)
            );
            w.conn()
                .execute(&sql, libsql::params![name, description, full_name])
                .await
                .map_err(on(kind.entity()))?;
            Ok(Lookup {
                id: w.conn().last_insert_rowid(),
                kind,
                name: name.to_string(),
                description: description.map(String::from),
                full_name: full_name.map(String::from),
            })
        }
        .await;
        let lookup = w.finish(result).await?;

        tracing::debug!(kind = kind.as_str(), id = lookup.id, name, "lookup created");
        Ok(lookup)
    }

    pub async fn get_lookup(&self, kind: LookupKind, id: i64) -> Result<Lookup, DatabaseError> {
        let _gate = self.read().await;
        fetch_lookup(self.db().conn(), kind, id).await
    }

    pub async fn find_lookup_by_name(
        &self,
        kind: LookupKind,
        name: &str,
    ) -> Result<Option<Lookup>, DatabaseError> {
        let _gate = self.read().await;
        let sql = format!(
            "SELECT id, name, description, full_name FROM {} WHERE name = ?1",
            lookup_table(kind)
        );
        let mut rows = self.db().conn().query(&sql, [name]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_lookup(kind, &row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_lookups(
        &self,
        kind: LookupKind,
        limit: u32,
    ) -> Result<Vec<Lookup>, DatabaseError> {
        let _gate = self.read().await;
        let sql = format!(
            "SELECT id, name, description, full_name FROM {} ORDER BY name LIMIT ?1",
            lookup_table(kind)
        );
        let mut rows = self.db().conn().query(&sql, [i64::from(limit)]).await?;

        let mut lookups = Vec::new();
        while let Some(row) = rows.next().await? {
            lookups.push(row_to_lookup(kind, &row)?);
        }
        Ok(lookups)
    }

    pub async fn update_lookup(
        &self,
        kind: LookupKind,
        id: i64,
        update: LookupUpdate,
    ) -> Result<Lookup, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref name) = update.name {
            if name.is_empty() {
                return Err(DatabaseError::validation("lookup name must not be empty"));
            }
            sets.push(format!("name = ?{idx}"));
            params.push(name.as_str().into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(ref full_name) = update.full_name {
            sets.push(format!("full_name = ?{idx}"));
            params.push(full_name.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_lookup(kind, id).await;
        }

        params.push(id.into());
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{idx}",
            lookup_table(kind),
            sets.join(", ")
        );

        let w = self.begin_write().await?;
        let result: Result<Lookup, DatabaseError> = async {
            let affected = w
                .conn()
                .execute(&sql, libsql::params_from_iter(params))
                .await
                .map_err(on(kind.entity()))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(kind.entity(), id));
            }
            fetch_lookup(w.conn(), kind, id).await
        }
        .await;
        let lookup = w.finish(result).await?;

        tracing::debug!(kind = kind.as_str(), id, "lookup updated");
        Ok(lookup)
    }

    /// Delete a lookup row. Refused with `ReferentialIntegrity` while any
    /// component (or annotated qualification) still points at it.
    pub async fn delete_lookup(&self, kind: LookupKind, id: i64) -> Result<(), DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            let sql = format!("DELETE FROM {} WHERE id = ?1", lookup_table(kind));
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

        tracing::debug!(kind = kind.as_str(), id, "lookup deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use crate::updates::lookup::LookupUpdateBuilder;

    #[tokio::test]
    async fn every_kind_has_its_own_table() {
        let svc = test_service().await;
        for kind in LookupKind::ALL {
            let row = svc.create_lookup(kind, "Active", None, None).await.unwrap();
            assert_eq!(row.kind, kind);
            assert_eq!(svc.get_lookup(kind, row.id).await.unwrap(), row);
        }
    }

    #[tokio::test]
    async fn name_is_unique_per_kind() {
        let svc = test_service().await;
        svc.create_lookup(LookupKind::Type, "Resistor", None, None)
            .await
            .unwrap();
        let err = svc
            .create_lookup(LookupKind::Type, "Resistor", Some("again"), None)
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn empty_name_uses_default() {
        let svc = test_service().await;
        let row = svc
            .create_lookup(LookupKind::MountingType, "", None, None)
            .await
            .unwrap();
        assert_eq!(row.name, DEFAULT_NAME);
    }

    #[tokio::test]
    async fn update_clears_optional_text() {
        let svc = test_service().await;
        let row = svc
            .create_lookup(
                LookupKind::Qualification,
                "AEC-Q200",
                Some("Passive components"),
                Some("Automotive Electronics Council Q200"),
            )
            .await
            .unwrap();

        let updated = svc
            .update_lookup(
                LookupKind::Qualification,
                row.id,
                LookupUpdateBuilder::new().description(None).build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.full_name.as_deref(), Some("Automotive Electronics Council Q200"));
    }

    #[tokio::test]
    async fn find_and_list_by_name() {
        let svc = test_service().await;
        for name in ["Obsolete", "Active", "NRND"] {
            svc.create_lookup(LookupKind::LifecycleState, name, None, None)
                .await
                .unwrap();
        }
        let found = svc
            .find_lookup_by_name(LookupKind::LifecycleState, "NRND")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "NRND");

        let names: Vec<_> = svc
            .list_lookups(LookupKind::LifecycleState, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Active", "NRND", "Obsolete"]);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let svc = test_service().await;
        let err = svc.delete_lookup(LookupKind::Type, 42).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
