//! Component repository.
//!
//! A component is stored as two rows sharing one id: the `base_components`
//! row (type, library, description/value) and the audited `components` row.
//! Both are written in the same transaction. Audit fields are stamped here
//! from the service clock; callers only name the acting user.

use parts_core::audit::{AuditDraft, AuditFields, Audited};
use parts_core::entities::{BaseComponent, Component};
use parts_core::enums::{ComponentOrder, EntityKind};
use serde::Serialize;

use crate::error::{DatabaseError, on};
use crate::helpers::{format_datetime, get_bool, get_opt_string, get_u32, parse_datetime};
use crate::service::PartsService;
use crate::updates::component::ComponentUpdate;

/// Longest manufacturer part number accepted.
pub const MPN_MAX_LEN: usize = 64;

const COMPONENT_COLUMNS: &str = "b.id, b.type_id, b.library_id, b.description, b.value, \
    b.autogenerate_description, b.autogenerate_value, \
    c.creator_id, c.created, c.last_modifier_id, c.last_modified, \
    c.lifecycle_state_id, c.manufacturer_id, c.mpn, c.mounting_type_id, c.package_id, \
    c.remarks, c.stock, c.x, c.y, c.z";

const COMPONENT_FROM: &str = "components c JOIN base_components b ON b.id = c.id";

/// Field values for a component that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComponent {
    pub type_id: i64,
    pub library_id: i64,
    pub description: Option<String>,
    pub value: Option<String>,
    pub autogenerate_description: bool,
    pub autogenerate_value: bool,
    pub lifecycle_state_id: i64,
    pub manufacturer_id: i64,
    pub mpn: String,
    pub mounting_type_id: i64,
    pub package_id: Option<i64>,
    pub remarks: Option<String>,
    pub stock: u32,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl NewComponent {
    /// Required references plus defaults for everything else: autogenerated
    /// description and value, zero stock, no package, no dimensions.
    #[must_use]
    pub fn new(
        type_id: i64,
        library_id: i64,
        lifecycle_state_id: i64,
        manufacturer_id: i64,
        mounting_type_id: i64,
        mpn: impl Into<String>,
    ) -> Self {
        Self {
            type_id,
            library_id,
            description: None,
            value: None,
            autogenerate_description: true,
            autogenerate_value: true,
            lifecycle_state_id,
            manufacturer_id,
            mpn: mpn.into(),
            mounting_type_id,
            package_id: None,
            remarks: None,
            stock: 0,
            x: None,
            y: None,
            z: None,
        }
    }
}

/// How many rows of each kind hang off one component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComponentCounts {
    pub links: u32,
    pub f_nodes: u32,
    pub qualifications: u32,
    pub reviews: u32,
}

fn validate_mpn(mpn: &str) -> Result<(), DatabaseError> {
    if mpn.trim().is_empty() {
        return Err(DatabaseError::validation("mpn must not be empty"));
    }
    if mpn.chars().count() > MPN_MAX_LEN {
        return Err(DatabaseError::validation(format!(
            "mpn is longer than {MPN_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn row_to_component(row: &libsql::Row) -> Result<Component, DatabaseError> {
    Ok(Component {
        base: BaseComponent {
            id: row.get::<i64>(0)?,
            type_id: row.get::<i64>(1)?,
            library_id: row.get::<i64>(2)?,
            description: get_opt_string(row, 3)?,
            value: get_opt_string(row, 4)?,
            autogenerate_description: get_bool(row, 5)?,
            autogenerate_value: get_bool(row, 6)?,
        },
        audit: AuditFields {
            creator_id: row.get::<i64>(7)?,
            created: parse_datetime(&row.get::<String>(8)?)?,
            last_modifier_id: row.get::<i64>(9)?,
            last_modified: parse_datetime(&row.get::<String>(10)?)?,
        },
        lifecycle_state_id: row.get::<i64>(11)?,
        manufacturer_id: row.get::<i64>(12)?,
        mpn: row.get::<String>(13)?,
        mounting_type_id: row.get::<i64>(14)?,
        package_id: row.get::<Option<i64>>(15)?,
        remarks: get_opt_string(row, 16)?,
        stock: get_u32(row, 17)?,
        x: row.get::<Option<f64>>(18)?,
        y: row.get::<Option<f64>>(19)?,
        z: row.get::<Option<f64>>(20)?,
    })
}

pub(crate) async fn fetch_component(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Component, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {COMPONENT_COLUMNS} FROM {COMPONENT_FROM} WHERE c.id = ?1"),
            [id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityKind::Component, id))?;
    row_to_component(&row)
}

/// Write every column of an existing component's two rows.
async fn store_component(
    conn: &libsql::Connection,
    component: &Component,
) -> Result<(), DatabaseError> {
    let base = &component.base;
    conn.execute(
        "UPDATE base_components SET type_id = ?1, library_id = ?2, description = ?3, \
         value = ?4, autogenerate_description = ?5, autogenerate_value = ?6 WHERE id = ?7",
        libsql::params![
            base.type_id,
            base.library_id,
            base.description.as_deref(),
            base.value.as_deref(),
            i64::from(base.autogenerate_description),
            i64::from(base.autogenerate_value),
            base.id,
        ],
    )
    .await
    .map_err(on(EntityKind::BaseComponent))?;

    let audit = &component.audit;
    conn.execute(
        "UPDATE components SET last_modifier_id = ?1, last_modified = ?2, \
         lifecycle_state_id = ?3, manufacturer_id = ?4, mpn = ?5, mounting_type_id = ?6, \
         package_id = ?7, remarks = ?8, stock = ?9, x = ?10, y = ?11, z = ?12 WHERE id = ?13",
        libsql::params![
            audit.last_modifier_id,
            format_datetime(&audit.last_modified),
            component.lifecycle_state_id,
            component.manufacturer_id,
            component.mpn.as_str(),
            component.mounting_type_id,
            component.package_id,
            component.remarks.as_deref(),
            i64::from(component.stock),
            component.x,
            component.y,
            component.z,
            base.id,
        ],
    )
    .await
    .map_err(on(EntityKind::Component))?;
    Ok(())
}

impl PartsService {
    /// Create a component on behalf of `actor_id`.
    ///
    /// `created` and `last_modified` come from `draft` when pre-supplied,
    /// otherwise from the service clock; both creator and last modifier are
    /// the actor.
    ///
    /// # Errors
    ///
    /// `ReferentialIntegrity` if the actor or any referenced lookup, company,
    /// library or package does not exist; `Validation` for a bad `mpn`.
    pub async fn create_component(
        &self,
        actor_id: i64,
        new: NewComponent,
        draft: AuditDraft,
    ) -> Result<Component, DatabaseError> {
        validate_mpn(&new.mpn)?;

        let w = self.begin_write().await?;
        let audit = AuditFields::for_insert(actor_id, draft, self.now());
        let result: Result<Component, DatabaseError> = async {
            w.conn()
                .execute(
                    "INSERT INTO base_components (type_id, library_id, description, value, \
                     autogenerate_description, autogenerate_value) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    libsql::params![
                        new.type_id,
                        new.library_id,
                        new.description.as_deref(),
                        new.value.as_deref(),
                        i64::from(new.autogenerate_description),
                        i64::from(new.autogenerate_value),
                    ],
                )
                .await
                .map_err(on(EntityKind::BaseComponent))?;
            let id = w.conn().last_insert_rowid();

            w.conn()
                .execute(
                    "INSERT INTO components (id, creator_id, created, last_modifier_id, \
                     last_modified, lifecycle_state_id, manufacturer_id, mpn, mounting_type_id, \
                     package_id, remarks, stock, x, y, z) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                    libsql::params![
                        id,
                        audit.creator_id,
                        format_datetime(&audit.created),
                        audit.last_modifier_id,
                        format_datetime(&audit.last_modified),
                        new.lifecycle_state_id,
                        new.manufacturer_id,
                        new.mpn.as_str(),
                        new.mounting_type_id,
                        new.package_id,
                        new.remarks.as_deref(),
                        i64::from(new.stock),
                        new.x,
                        new.y,
                        new.z,
                    ],
                )
                .await
                .map_err(on(EntityKind::Component))?;

            Ok(Component {
                base: BaseComponent {
                    id,
                    type_id: new.type_id,
                    library_id: new.library_id,
                    description: new.description.clone(),
                    value: new.value.clone(),
                    autogenerate_description: new.autogenerate_description,
                    autogenerate_value: new.autogenerate_value,
                },
                audit,
                lifecycle_state_id: new.lifecycle_state_id,
                manufacturer_id: new.manufacturer_id,
                mpn: new.mpn.clone(),
                mounting_type_id: new.mounting_type_id,
                package_id: new.package_id,
                remarks: new.remarks.clone(),
                stock: new.stock,
                x: new.x,
                y: new.y,
                z: new.z,
            })
        }
        .await;
        let component = w.finish(result).await?;

        tracing::debug!(
            id = component.id(),
            actor_id,
            mpn = %component.mpn,
            "component created"
        );
        Ok(component)
    }

    pub async fn get_component(&self, id: i64) -> Result<Component, DatabaseError> {
        let _gate = self.read().await;
        fetch_component(self.db().conn(), id).await
    }

    /// List components, newest first unless `order` says otherwise.
    pub async fn list_components(
        &self,
        order: ComponentOrder,
        limit: u32,
    ) -> Result<Vec<Component>, DatabaseError> {
        let _gate = self.read().await;
        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM {COMPONENT_FROM} ORDER BY {} LIMIT ?1",
            order.order_by()
        );
        let mut rows = self.db().conn().query(&sql, [i64::from(limit)]).await?;

        let mut components = Vec::new();
        while let Some(row) = rows.next().await? {
            components.push(row_to_component(&row)?);
        }
        Ok(components)
    }

    /// Components created by `user_id`, newest first.
    pub async fn list_created_components(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<Component>, DatabaseError> {
        let _gate = self.read().await;
        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM {COMPONENT_FROM} WHERE c.creator_id = ?1 \
             ORDER BY {} LIMIT ?2",
            ComponentOrder::CreatedDesc.order_by()
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params![user_id, i64::from(limit)])
            .await?;

        let mut components = Vec::new();
        while let Some(row) = rows.next().await? {
            components.push(row_to_component(&row)?);
        }
        Ok(components)
    }

    /// Apply `update` on behalf of `actor_id`.
    ///
    /// Every call is a save: `last_modified` and `last_modifier` are refreshed
    /// even when `update` changes nothing else. `created` and `creator` never
    /// change.
    pub async fn update_component(
        &self,
        actor_id: i64,
        id: i64,
        update: ComponentUpdate,
    ) -> Result<Component, DatabaseError> {
        if let Some(mpn) = &update.mpn {
            validate_mpn(mpn)?;
        }

        let w = self.begin_write().await?;
        let now = self.now();
        let result: Result<Component, DatabaseError> = async {
            let mut component = fetch_component(w.conn(), id).await?;
            update.apply_to(&mut component);
            component.touch(actor_id, now);
            store_component(w.conn(), &component).await?;
            Ok(component)
        }
        .await;
        let component = w.finish(result).await?;

        tracing::debug!(id, actor_id, "component updated");
        Ok(component)
    }

    /// Delete a component together with its base row. Memberships, annotated
    /// qualifications and reviews go with it.
    pub async fn delete_component(&self, id: i64) -> Result<(), DatabaseError> {
        let w = self.begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            let affected = w
                .conn()
                .execute("DELETE FROM base_components WHERE id = ?1", [id])
                .await
                .map_err(on(EntityKind::Component))?;
            if affected == 0 {
                return Err(DatabaseError::not_found(EntityKind::Component, id));
            }
            Ok(())
        }
        .await;
        w.finish(result).await?;

        tracing::debug!(id, "component deleted");
        Ok(())
    }

    pub async fn component_counts(&self, id: i64) -> Result<ComponentCounts, DatabaseError> {
        let _gate = self.read().await;
        let conn = self.db().conn();
        fetch_component(conn, id).await?;

        let count = |sql: &'static str| async move {
            let n = super::count(conn, sql, [id]).await?;
            u32::try_from(n).map_err(|e| DatabaseError::Other(e.into()))
        };
        Ok(ComponentCounts {
            links: count("SELECT COUNT(*) FROM ordered_links WHERE base_component_id = ?1").await?,
            f_nodes: count("SELECT COUNT(*) FROM ordered_f_nodes WHERE base_component_id = ?1")
                .await?,
            qualifications: count(
                "SELECT COUNT(*) FROM annotated_qualifications WHERE component_id = ?1",
            )
            .await?,
            reviews: count("SELECT COUNT(*) FROM reviews WHERE component_id = ?1").await?,
        })
    }
}
