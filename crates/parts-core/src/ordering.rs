//! Per-parent ordering of membership rows.
//!
//! Within one parent the `order` values of its memberships are always exactly
//! `0..len`. Every insert, remove or move is expressed as one [`Shift`] of a
//! contiguous block of siblings by one slot, plus the write of the row that
//! triggered it. This module only does the arithmetic; the store applies it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MembershipKind;
use crate::errors::CoreError;

/// A join row placing a child (link or footprint node) at a position under a
/// base component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OrderedMembership {
    pub id: i64,
    pub kind: MembershipKind,
    pub parent_id: i64,
    pub child_id: i64,
    pub order: u32,
}

impl OrderedMembership {
    /// Display label for this position, e.g. `"Link"` or `"Link 3"`.
    #[must_use]
    pub fn position_label(&self) -> String {
        position_label(self.kind, self.order)
    }
}

/// `"Link"` for order 0, `"Link 3"` for order 3.
#[must_use]
pub fn position_label(kind: MembershipKind, order: u32) -> String {
    if order == 0 {
        kind.label_stem().to_string()
    } else {
        format!("{} {order}", kind.label_stem())
    }
}

/// Direction a block of siblings moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Move every sibling whose order is in `start..=end` one slot in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub start: u32,
    pub end: u32,
    pub direction: Direction,
}

impl Shift {
    #[must_use]
    pub const fn contains(&self, order: u32) -> bool {
        order >= self.start && order <= self.end
    }

    /// New order of a sibling currently at `order`.
    #[must_use]
    pub const fn apply(&self, order: u32) -> u32 {
        if !self.contains(order) {
            return order;
        }
        match self.direction {
            Direction::Up => order + 1,
            Direction::Down => order - 1,
        }
    }
}

/// Where a new membership lands and which siblings make room for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPlan {
    pub order: u32,
    pub shift: Option<Shift>,
}

/// Plan an insert into a scope of `len` rows. `None` appends.
///
/// # Errors
///
/// `CoreError::OutOfRange` if `position > len`.
pub fn plan_insert(scope: &str, len: u32, position: Option<u32>) -> Result<InsertPlan, CoreError> {
    let order = position.unwrap_or(len);
    if order > len {
        return Err(CoreError::position_out_of_range(scope, order, len));
    }
    let shift = (order < len).then(|| Shift {
        start: order,
        end: len - 1,
        direction: Direction::Up,
    });
    Ok(InsertPlan { order, shift })
}

/// Siblings to close the gap left by removing the row at `order`.
///
/// # Errors
///
/// `CoreError::OutOfRange` if `order >= len`.
pub fn plan_remove(scope: &str, len: u32, order: u32) -> Result<Option<Shift>, CoreError> {
    if order >= len {
        return Err(CoreError::position_out_of_range(scope, order, len.saturating_sub(1)));
    }
    Ok((order + 1 < len).then(|| Shift {
        start: order + 1,
        end: len - 1,
        direction: Direction::Down,
    }))
}

/// Siblings displaced when the row at `from` moves to `to`.
///
/// # Errors
///
/// `CoreError::OutOfRange` if either position is `>= len`.
pub fn plan_move(scope: &str, len: u32, from: u32, to: u32) -> Result<Option<Shift>, CoreError> {
    let last = len.saturating_sub(1);
    if from >= len {
        return Err(CoreError::position_out_of_range(scope, from, last));
    }
    if to >= len {
        return Err(CoreError::position_out_of_range(scope, to, last));
    }
    Ok(match from.cmp(&to) {
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Less => Some(Shift {
            start: from + 1,
            end: to,
            direction: Direction::Down,
        }),
        std::cmp::Ordering::Greater => Some(Shift {
            start: to,
            end: from - 1,
            direction: Direction::Up,
        }),
    })
}

/// Whether `orders` is exactly `0..orders.len()` in some order.
#[must_use]
pub fn is_gapless(orders: &[u32]) -> bool {
    let mut sorted = orders.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(i, &o)| u32::try_from(i).is_ok_and(|i| i == o))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Orders of named siblings, rebuilt after each plan like the store does.
    fn apply(rows: &mut Vec<(&'static str, u32)>, shift: Option<Shift>) {
        if let Some(shift) = shift {
            for row in rows.iter_mut() {
                row.1 = shift.apply(row.1);
            }
        }
    }

    fn order_of(rows: &[(&'static str, u32)], name: &str) -> u32 {
        rows.iter().find(|r| r.0 == name).unwrap().1
    }

    #[test]
    fn append_then_insert_front_then_remove() {
        let mut rows = Vec::new();

        let plan = plan_insert("p", 0, None).unwrap();
        apply(&mut rows, plan.shift);
        rows.push(("a", plan.order));
        assert_eq!(order_of(&rows, "a"), 0);

        let plan = plan_insert("p", 1, Some(0)).unwrap();
        apply(&mut rows, plan.shift);
        rows.push(("b", plan.order));
        assert_eq!(order_of(&rows, "b"), 0);
        assert_eq!(order_of(&rows, "a"), 1);

        let shift = plan_remove("p", 2, order_of(&rows, "b")).unwrap();
        rows.retain(|r| r.0 != "b");
        apply(&mut rows, shift);
        assert_eq!(order_of(&rows, "a"), 0);
    }

    #[test]
    fn first_insert_into_empty_scope() {
        let plan = plan_insert("p", 0, None).unwrap();
        assert_eq!(plan, InsertPlan { order: 0, shift: None });

        let plan = plan_insert("p", 0, Some(0)).unwrap();
        assert_eq!(plan, InsertPlan { order: 0, shift: None });
        assert!(plan_insert("p", 0, Some(1)).unwrap_err().is_out_of_range());
    }

    #[test]
    fn insert_past_end_is_out_of_range() {
        let err = plan_insert("p", 2, Some(3)).unwrap_err();
        assert!(err.is_out_of_range());
        assert!(plan_insert("p", 2, Some(2)).is_ok());
    }

    #[test]
    fn remove_last_needs_no_shift() {
        assert_eq!(plan_remove("p", 3, 2).unwrap(), None);
        assert!(plan_remove("p", 3, 3).unwrap_err().is_out_of_range());
        assert!(plan_remove("p", 0, 0).unwrap_err().is_out_of_range());
    }

    #[test]
    fn move_down_and_up_keep_gapless() {
        let mut rows = vec![("a", 0), ("b", 1), ("c", 2), ("d", 3)];

        // a: 0 -> 2
        let shift = plan_move("p", 4, 0, 2).unwrap();
        rows.iter_mut().filter(|r| r.0 != "a").for_each(|r| {
            if let Some(s) = shift {
                r.1 = s.apply(r.1);
            }
        });
        rows.iter_mut().find(|r| r.0 == "a").unwrap().1 = 2;
        assert_eq!(order_of(&rows, "b"), 0);
        assert_eq!(order_of(&rows, "c"), 1);
        assert_eq!(order_of(&rows, "a"), 2);
        assert_eq!(order_of(&rows, "d"), 3);

        // d: 3 -> 0
        let shift = plan_move("p", 4, 3, 0).unwrap();
        rows.iter_mut().filter(|r| r.0 != "d").for_each(|r| {
            if let Some(s) = shift {
                r.1 = s.apply(r.1);
            }
        });
        rows.iter_mut().find(|r| r.0 == "d").unwrap().1 = 0;
        let names: Vec<_> = {
            let mut sorted = rows.clone();
            sorted.sort_by_key(|r| r.1);
            sorted.into_iter().map(|r| r.0).collect()
        };
        assert_eq!(names, vec!["d", "b", "c", "a"]);
        assert!(is_gapless(&rows.iter().map(|r| r.1).collect::<Vec<_>>()));
    }

    #[test]
    fn move_in_place_is_noop() {
        assert_eq!(plan_move("p", 3, 1, 1).unwrap(), None);
        assert!(plan_move("p", 3, 1, 3).unwrap_err().is_out_of_range());
    }

    #[test]
    fn labels_omit_zero() {
        assert_eq!(position_label(MembershipKind::Link, 0), "Link");
        assert_eq!(position_label(MembershipKind::Link, 3), "Link 3");
        assert_eq!(position_label(MembershipKind::FNode, 0), "FNode Ref");
        assert_eq!(position_label(MembershipKind::FNode, 1), "FNode Ref 1");
    }

    #[test]
    fn gapless_detection() {
        assert!(is_gapless(&[]));
        assert!(is_gapless(&[2, 0, 1]));
        assert!(!is_gapless(&[0, 2]));
        assert!(!is_gapless(&[0, 0]));
    }
}
