//! Ordered membership repository: links and footprint nodes attached to a base
//! component at explicit, gapless positions.
//!
//! The arithmetic lives in `parts_core::ordering`; this module applies the
//! planned [`Shift`] to the rows of one parent. `(base_component_id, ord)` is
//! unique, and SQLite checks that per row during an `UPDATE`, so a shift runs in
//! two phases: the block is first parked at negative orders (`-ord - 1`), then
//! brought back at its new positions.

use parts_core::enums::MembershipKind;
use parts_core::errors::CoreError;
use parts_core::ordering::{OrderedMembership, Shift, plan_insert, plan_move, plan_remove};

use crate::error::{DatabaseError, on};
use crate::helpers::{get_u32, membership_columns};
use crate::service::PartsService;

fn scope(kind: MembershipKind, parent_id: i64) -> String {
    format!("{} of base component {parent_id}", membership_columns(kind).0)
}

fn row_to_membership(
    kind: MembershipKind,
    row: &libsql::Row,
) -> Result<OrderedMembership, DatabaseError> {
    Ok(OrderedMembership {
        id: row.get::<i64>(0)?,
        kind,
        parent_id: row.get::<i64>(1)?,
        child_id: row.get::<i64>(2)?,
        order: get_u32(row, 3)?,
    })
}

pub(crate) async fn fetch_membership(
    conn: &libsql::Connection,
    kind: MembershipKind,
    id: i64,
) -> Result<Option<OrderedMembership>, DatabaseError> {
    let (table, child) = membership_columns(kind);
    let sql = format!("SELECT id, base_component_id, {child}, ord FROM {table} WHERE id = ?1");
    let mut rows = conn.query(&sql, [id]).await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_membership(kind, &row)?)),
        None => Ok(None),
    }
}

async fn sibling_count(
    conn: &libsql::Connection,
    kind: MembershipKind,
    parent_id: i64,
) -> Result<u32, DatabaseError> {
    let table = membership_columns(kind).0;
    let n = super::count(
        conn,
        &format!("SELECT COUNT(*) FROM {table} WHERE base_component_id = ?1"),
        [parent_id],
    )
    .await?;
    u32::try_from(n).map_err(|e| DatabaseError::Other(e.into()))
}

/// Move the siblings in `shift.start..=shift.end` of `parent_id` by one slot.
async fn apply_shift(
    conn: &libsql::Connection,
    kind: MembershipKind,
    parent_id: i64,
    shift: Shift,
) -> Result<(), DatabaseError> {
    let table = membership_columns(kind).0;
    let start = i64::from(shift.start);
    let end = i64::from(shift.end);

    conn.execute(
        &format!(
            "UPDATE {table} SET ord = -ord - 1 \
             WHERE base_component_id = ?1 AND ord BETWEEN ?2 AND ?3"
        ),
        libsql::params![parent_id, start, end],
    )
    .await
    .map_err(on(kind.entity()))?;

    conn.execute(
        &format!(
            "UPDATE {table} SET ord = -ord - 1 + ?4 \
             WHERE base_component_id = ?1 AND ord BETWEEN ?2 AND ?3"
        ),
        libsql::params![parent_id, -end - 1, -start - 1, shift.direction.delta()],
    )
    .await
    .map_err(on(kind.entity()))?;

    tracing::trace!(
        table,
        parent_id,
        start,
        end,
        delta = shift.direction.delta(),
        "siblings shifted"
    );
    Ok(())
}

/// Delete one membership and close the gap it leaves.
async fn remove_in(
    conn: &libsql::Connection,
    kind: MembershipKind,
    id: i64,
) -> Result<OrderedMembership, DatabaseError> {
    let table = membership_columns(kind).0;
    let membership = fetch_membership(conn, kind, id)
        .await?
        .ok_or_else(|| CoreError::missing_membership(table, id))?;

    let len = sibling_count(conn, kind, membership.parent_id).await?;
    let shift = plan_remove(&scope(kind, membership.parent_id), len, membership.order)?;

    conn.execute(&format!("DELETE FROM {table} WHERE id = ?1"), [id])
        .await
        .map_err(on(kind.entity()))?;
    if let Some(shift) = shift {
        apply_shift(conn, kind, membership.parent_id, shift).await?;
    }
    Ok(membership)
}

/// Remove every membership of `child_id`, renumbering each affected parent.
///
/// Runs inside the caller's transaction before the child row itself is
/// deleted.
pub(crate) async fn detach_child(
    conn: &libsql::Connection,
    kind: MembershipKind,
    child_id: i64,
) -> Result<u32, DatabaseError> {
    let (table, child) = membership_columns(kind);
    let mut rows = conn
        .query(
            &format!("SELECT id FROM {table} WHERE {child} = ?1 ORDER BY id"),
            [child_id],
        )
        .await?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next().await? {
        ids.push(row.get::<i64>(0)?);
    }
    drop(rows);

    let mut removed = 0;
    for id in ids {
        remove_in(conn, kind, id).await?;
        removed += 1;
    }
    if removed > 0 {
        tracing::debug!(kind = kind.as_str(), child_id, removed, "child detached from parents");
    }
    Ok(removed)
}

impl PartsService {
    /// Attach `child_id` to `parent_id`. `None` appends; `Some(p)` inserts at
    /// `p` and moves every sibling at or after `p` up by one.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `p` exceeds the current number of siblings;
    /// `ReferentialIntegrity` if the parent or child does not exist.
    pub async fn add_membership(
        &self,
        kind: MembershipKind,
        parent_id: i64,
        child_id: i64,
        position: Option<u32>,
    ) -> Result<OrderedMembership, DatabaseError> {
        let (table, child) = membership_columns(kind);

        let w = self.begin_write().await?;
        let result: Result<OrderedMembership, DatabaseError> = async {
            let len = sibling_count(w.conn(), kind, parent_id).await?;
            let plan = plan_insert(&scope(kind, parent_id), len, position)?;
            if let Some(shift) = plan.shift {
                apply_shift(w.conn(), kind, parent_id, shift).await?;
            }
            w.conn()
                .execute(
                    &format!(
                        "INSERT INTO {table} (base_component_id, {child}, ord) VALUES (?1, ?2, ?3)"
                    ),
                    libsql::params![parent_id, child_id, i64::from(plan.order)],
                )
                .await
                .map_err(on(kind.entity()))?;
            Ok(OrderedMembership {
                id: w.conn().last_insert_rowid(),
                kind,
                parent_id,
                child_id,
                order: plan.order,
            })
        }
        .await;
        let membership = w.finish(result).await?;

        tracing::debug!(
            kind = kind.as_str(),
            id = membership.id,
            parent_id,
            child_id,
            order = membership.order,
            "membership added"
        );
        Ok(membership)
    }

    pub async fn get_membership(
        &self,
        kind: MembershipKind,
        id: i64,
    ) -> Result<OrderedMembership, DatabaseError> {
        let _gate = self.read().await;
        fetch_membership(self.db().conn(), kind, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(kind.entity(), id))
    }

    /// Memberships of one parent, by ascending order.
    pub async fn list_memberships(
        &self,
        kind: MembershipKind,
        parent_id: i64,
    ) -> Result<Vec<OrderedMembership>, DatabaseError> {
        let _gate = self.read().await;
        let (table, child) = membership_columns(kind);
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT id, base_component_id, {child}, ord FROM {table} \
                     WHERE base_component_id = ?1 ORDER BY ord"
                ),
                [parent_id],
            )
            .await?;

        let mut memberships = Vec::new();
        while let Some(row) = rows.next().await? {
            memberships.push(row_to_membership(kind, &row)?);
        }
        Ok(memberships)
    }

    /// Remove a membership and move every later sibling down by one.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if no membership with `id` exists; nothing is changed.
    pub async fn remove_membership(
        &self,
        kind: MembershipKind,
        id: i64,
    ) -> Result<OrderedMembership, DatabaseError> {
        let w = self.begin_write().await?;
        let result = remove_in(w.conn(), kind, id).await;
        let removed = w.finish(result).await?;

        tracing::debug!(
            kind = kind.as_str(),
            id,
            parent_id = removed.parent_id,
            order = removed.order,
            "membership removed"
        );
        Ok(removed)
    }

    /// Move a membership to `to` within its parent. The siblings between the
    /// old and new position shift by one to keep the order gapless.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `id` is unknown or `to` is not below the sibling count.
    pub async fn move_membership(
        &self,
        kind: MembershipKind,
        id: i64,
        to: u32,
    ) -> Result<OrderedMembership, DatabaseError> {
        let table = membership_columns(kind).0;

        let w = self.begin_write().await?;
        let result: Result<OrderedMembership, DatabaseError> = async {
            let mut membership = fetch_membership(w.conn(), kind, id)
                .await?
                .ok_or_else(|| CoreError::missing_membership(table, id))?;
            let parent_id = membership.parent_id;
            let len = sibling_count(w.conn(), kind, parent_id).await?;

            let Some(shift) = plan_move(&scope(kind, parent_id), len, membership.order, to)?
            else {
                return Ok(membership);
            };

            // Park below every slot the shift may use.
            w.conn()
                .execute(
                    &format!("UPDATE {table} SET ord = ?1 WHERE id = ?2"),
                    libsql::params![-i64::from(len) - 1, id],
                )
                .await
                .map_err(on(kind.entity()))?;
            apply_shift(w.conn(), kind, parent_id, shift).await?;
            w.conn()
                .execute(
                    &format!("UPDATE {table} SET ord = ?1 WHERE id = ?2"),
                    libsql::params![i64::from(to), id],
                )
                .await
                .map_err(on(kind.entity()))?;

            membership.order = to;
            Ok(membership)
        }
        .await;
        let membership = w.finish(result).await?;

        tracing::debug!(kind = kind.as_str(), id, to, "membership moved");
        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{component, fixture, test_service};
    use parts_core::enums::WebKind;
    use parts_core::ordering::is_gapless;
    use pretty_assertions::assert_eq;

    async fn link(svc: &PartsService, name: &str) -> i64 {
        svc.create_web_entity(WebKind::Link, name, &format!("http://example.com/{name}"))
            .await
            .unwrap()
            .id
    }

    /// `(child_id, order)` pairs of one parent, by order.
    async fn layout(svc: &PartsService, kind: MembershipKind, parent: i64) -> Vec<(i64, u32)> {
        svc.list_memberships(kind, parent)
            .await
            .unwrap()
            .into_iter()
            .map(|m| (m.child_id, m.order))
            .collect()
    }

    async fn assert_gapless(svc: &PartsService, kind: MembershipKind, parent: i64) {
        let orders: Vec<_> = layout(svc, kind, parent).await.into_iter().map(|l| l.1).collect();
        assert!(is_gapless(&orders), "orders {orders:?} of parent {parent}");
    }

    #[tokio::test]
    async fn insert_front_then_remove() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let parent = component(&svc, &fx, "C1").await.id();
        let a = link(&svc, "a").await;
        let b = link(&svc, "b").await;

        let ma = svc
            .add_membership(MembershipKind::Link, parent, a, None)
            .await
            .unwrap();
        assert_eq!(ma.order, 0);

        let mb = svc
            .add_membership(MembershipKind::Link, parent, b, Some(0))
            .await
            .unwrap();
        assert_eq!(mb.order, 0);
        assert_eq!(layout(&svc, MembershipKind::Link, parent).await, vec![(b, 0), (a, 1)]);

        svc.remove_membership(MembershipKind::Link, mb.id).await.unwrap();
        assert_eq!(layout(&svc, MembershipKind::Link, parent).await, vec![(a, 0)]);
    }

    #[tokio::test]
    async fn insert_in_middle_shifts_tail() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let parent = component(&svc, &fx, "C1").await.id();
        let ids = [link(&svc, "a").await, link(&svc, "b").await, link(&svc, "c").await];
        for id in ids {
            svc.add_membership(MembershipKind::Link, parent, id, None)
                .await
                .unwrap();
        }
        let d = link(&svc, "d").await;
        svc.add_membership(MembershipKind::Link, parent, d, Some(1))
            .await
            .unwrap();

        assert_eq!(
            layout(&svc, MembershipKind::Link, parent).await,
            vec![(ids[0], 0), (d, 1), (ids[1], 2), (ids[2], 3)]
        );
    }

    #[tokio::test]
    async fn insert_past_end_is_out_of_range() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let parent = component(&svc, &fx, "C1").await.id();
        let a = link(&svc, "a").await;

        let err = svc
            .add_membership(MembershipKind::Link, parent, a, Some(1))
            .await
            .unwrap_err();
        assert!(err.is_out_of_range(), "got {err}");
        assert!(layout(&svc, MembershipKind::Link, parent).await.is_empty());
    }

    #[tokio::test]
    async fn remove_unknown_leaves_siblings() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let parent = component(&svc, &fx, "C1").await.id();
        let a = link(&svc, "a").await;
        svc.add_membership(MembershipKind::Link, parent, a, None)
            .await
            .unwrap();

        let err = svc
            .remove_membership(MembershipKind::Link, 9999)
            .await
            .unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(layout(&svc, MembershipKind::Link, parent).await, vec![(a, 0)]);
    }

    #[tokio::test]
    async fn move_both_directions() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let parent = component(&svc, &fx, "C1").await.id();
        let mut members = Vec::new();
        for name in ["a", "b", "c", "d"] {
            let child = link(&svc, name).await;
            members.push(
                svc.add_membership(MembershipKind::Link, parent, child, None)
                    .await
                    .unwrap(),
            );
        }
        let child = |i: usize| members[i].child_id;

        let moved = svc
            .move_membership(MembershipKind::Link, members[0].id, 2)
            .await
            .unwrap();
        assert_eq!(moved.order, 2);
        assert_eq!(
            layout(&svc, MembershipKind::Link, parent).await,
            vec![(child(1), 0), (child(2), 1), (child(0), 2), (child(3), 3)]
        );

        svc.move_membership(MembershipKind::Link, members[3].id, 0)
            .await
            .unwrap();
        assert_eq!(
            layout(&svc, MembershipKind::Link, parent).await,
            vec![(child(3), 0), (child(1), 1), (child(2), 2), (child(0), 3)]
        );
    }

    #[tokio::test]
    async fn move_out_of_bounds_is_rejected() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let parent = component(&svc, &fx, "C1").await.id();
        let a = link(&svc, "a").await;
        let m = svc
            .add_membership(MembershipKind::Link, parent, a, None)
            .await
            .unwrap();

        assert!(svc
            .move_membership(MembershipKind::Link, m.id, 1)
            .await
            .unwrap_err()
            .is_out_of_range());
        assert!(svc
            .move_membership(MembershipKind::Link, m.id + 100, 0)
            .await
            .unwrap_err()
            .is_out_of_range());
        assert_eq!(svc.move_membership(MembershipKind::Link, m.id, 0).await.unwrap(), m);
    }

    #[tokio::test]
    async fn scope_is_per_parent() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let p1 = component(&svc, &fx, "C1").await.id();
        let p2 = component(&svc, &fx, "C2").await.id();
        let node = svc.create_fnode("fp:0805", None).await.unwrap().id;

        let m1 = svc
            .add_membership(MembershipKind::FNode, p1, node, None)
            .await
            .unwrap();
        let m2 = svc
            .add_membership(MembershipKind::FNode, p2, node, None)
            .await
            .unwrap();
        assert_eq!((m1.order, m2.order), (0, 0));
        assert_eq!(m1.position_label(), "FNode Ref");
    }

    #[tokio::test]
    async fn deleting_child_renumbers_every_parent() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let p1 = component(&svc, &fx, "C1").await.id();
        let p2 = component(&svc, &fx, "C2").await.id();
        let shared = link(&svc, "shared").await;
        let other = link(&svc, "other").await;

        svc.add_membership(MembershipKind::Link, p1, shared, None).await.unwrap();
        svc.add_membership(MembershipKind::Link, p1, other, None).await.unwrap();
        svc.add_membership(MembershipKind::Link, p2, other, None).await.unwrap();
        svc.add_membership(MembershipKind::Link, p2, shared, None).await.unwrap();

        svc.delete_web_entity(WebKind::Link, shared).await.unwrap();

        assert_eq!(layout(&svc, MembershipKind::Link, p1).await, vec![(other, 0)]);
        assert_eq!(layout(&svc, MembershipKind::Link, p2).await, vec![(other, 0)]);
        assert_gapless(&svc, MembershipKind::Link, p1).await;
    }

    #[tokio::test]
    async fn missing_child_is_referential() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let parent = component(&svc, &fx, "C1").await.id();

        let err = svc
            .add_membership(MembershipKind::Link, parent, 4242, None)
            .await
            .unwrap_err();
        assert!(err.is_referential(), "got {err}");
    }

    #[tokio::test]
    async fn failed_positioned_insert_leaves_siblings_unshifted() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let parent = component(&svc, &fx, "C1").await.id();
        let a = link(&svc, "a").await;
        let b = link(&svc, "b").await;
        svc.add_membership(MembershipKind::Link, parent, a, None)
            .await
            .unwrap();
        svc.add_membership(MembershipKind::Link, parent, b, None)
            .await
            .unwrap();

        let err = svc
            .add_membership(MembershipKind::Link, parent, 4242, Some(0))
            .await
            .unwrap_err();
        assert!(err.is_referential(), "got {err}");
        assert_eq!(
            layout(&svc, MembershipKind::Link, parent).await,
            vec![(a, 0), (b, 1)]
        );

        // The write gate and connection are usable after the rollback.
        let c = link(&svc, "c").await;
        svc.add_membership(MembershipKind::Link, parent, c, Some(0))
            .await
            .unwrap();
        assert_eq!(
            layout(&svc, MembershipKind::Link, parent).await,
            vec![(c, 0), (a, 1), (b, 2)]
        );
    }

    #[tokio::test]
    async fn gapless_after_mixed_operations() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let parent = component(&svc, &fx, "C1").await.id();

        let mut ids = Vec::new();
        for i in 0..6 {
            let child = link(&svc, &format!("l{i}")).await;
            let position = if i % 2 == 0 { None } else { Some(0) };
            ids.push(
                svc.add_membership(MembershipKind::Link, parent, child, position)
                    .await
                    .unwrap()
                    .id,
            );
            assert_gapless(&svc, MembershipKind::Link, parent).await;
        }

        svc.move_membership(MembershipKind::Link, ids[0], 5).await.unwrap();
        assert_gapless(&svc, MembershipKind::Link, parent).await;
        svc.remove_membership(MembershipKind::Link, ids[3]).await.unwrap();
        assert_gapless(&svc, MembershipKind::Link, parent).await;
        svc.move_membership(MembershipKind::Link, ids[5], 0).await.unwrap();
        assert_gapless(&svc, MembershipKind::Link, parent).await;
        assert_eq!(layout(&svc, MembershipKind::Link, parent).await.len(), 5);
    }
}
