//! Naming helpers.
//!
//! `pluralize` derives collection labels from singular nouns. It is only used
//! to name relations and tables, never to rewrite stored data. The relation
//! names back to the acting user are declared statically per entity kind in
//! [`user_relations`]; tests keep that table in agreement with `pluralize`.

use crate::enums::EntityKind;

/// Plural form of a singular noun.
///
/// Only these rules apply, checked in order:
/// - ends in `y`: replace it with `ies`
/// - ends in `ch` or `ss`: append `es`
/// - ends in `s`: unchanged
/// - otherwise: append `s`
///
/// Irregular nouns are not handled. The empty string maps to itself.
#[must_use]
pub fn pluralize(noun: &str) -> String {
    if let Some(stem) = noun.strip_suffix('y') {
        format!("{stem}ies")
    } else if noun.ends_with("ch") || noun.ends_with("ss") {
        format!("{noun}es")
    } else if noun.ends_with('s') || noun.is_empty() {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

/// Names of the reverse relations from a user to the rows it created or
/// last modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRelations {
    pub created: &'static str,
    pub modified: &'static str,
}

/// Reverse relation names for audited kinds. `None` for kinds without audit
/// fields.
#[must_use]
pub const fn user_relations(kind: EntityKind) -> Option<UserRelations> {
    match kind {
        EntityKind::Component => Some(UserRelations {
            created: "created_components",
            modified: "modified_components",
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Company", "Companies")]
    #[case("Qualification", "Qualifications")]
    #[case("Link", "Links")]
    #[case("Class", "Classes")]
    #[case("Switch", "Switches")]
    #[case("Parts", "Parts")]
    #[case("library", "libraries")]
    #[case("component", "components")]
    #[case("", "")]
    fn pluralize_rules(#[case] noun: &str, #[case] expected: &str) {
        assert_eq!(pluralize(noun), expected);
    }

    #[test]
    fn irregular_nouns_are_not_special_cased() {
        assert_eq!(pluralize("Shelf"), "Shelfs");
        assert_eq!(pluralize("Potato"), "Potatos");
    }

    #[test]
    fn relation_table_agrees_with_pluralize() {
        for kind in EntityKind::ALL {
            match user_relations(kind) {
                Some(rel) => {
                    let plural = pluralize(&kind.type_name().to_lowercase());
                    assert_eq!(rel.created, format!("created_{plural}"));
                    assert_eq!(rel.modified, format!("modified_{plural}"));
                }
                None => assert!(!kind.is_audited(), "{kind} is audited but has no relations"),
            }
        }
    }
}
