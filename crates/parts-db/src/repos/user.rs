//! User repository: the acting identities audited rows point at.

use parts_core::entities::User;
use parts_core::enums::EntityKind;

use crate::error::{DatabaseError, on};
use crate::service::PartsService;

const USER_COLUMNS: &str = "id, username, email, first_name, last_name";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<i64>(0)?,
        username: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        first_name: row.get::<String>(3)?,
        last_name: row.get::<String>(4)?,
    })
}

pub(crate) async fn fetch_user(conn: &libsql::Connection, id: i64) -> Result<User, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"), [id])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityKind::User, id))?;
    row_to_user(&row)
}

impl PartsService {
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, DatabaseError> {
        if username.trim().is_empty() {
            return Err(DatabaseError::validation("username must not be empty"));
        }

        let w = self.begin_write().await?;
        let result: Result<User, DatabaseError> = async {
            w.conn()
                .execute(
                    "INSERT INTO users (username, email, first_name, last_name) VALUES (?1, ?2, ?3, ?4)",
                    libsql::params![username, email, first_name, last_name],
                )
                .await
                .map_err(on(EntityKind::User))?;
            Ok(User {
                id: w.conn().last_insert_rowid(),
                username: username.to_string(),
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })
        }
        .await;
        let user = w.finish(result).await?;

        tracing::debug!(id = user.id, username, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        let _gate = self.read().await;
        fetch_user(self.db().conn(), id).await
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                [username],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn count_users(&self) -> Result<u32, DatabaseError> {
        let _gate = self.read().await;
        let n = super::count(self.db().conn(), "SELECT COUNT(*) FROM users", ()).await?;
        u32::try_from(n).map_err(|e| DatabaseError::Other(e.into()))
    }

    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, DatabaseError> {
        let _gate = self.read().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// Delete a user. Refused with `ReferentialIntegrity` while any component
    /// or review still references them.
    pub async fn delete_user(&self, id: i64) -> Result<(), DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            let affected = w
                .conn()
                .execute("DELETE FROM users WHERE id = ?1", [id])
                .await
                .map_err(on(EntityKind::User))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(EntityKind::User, id));
            }
            Ok(())
        }
        .await;
        w.finish(result).await?;

        tracing::debug!(id, "user deleted");
        Ok(())
    }
}
