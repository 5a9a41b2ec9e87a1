//! Entity kinds and the small closed sets that select tables and behavior.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! The string returned by `as_str()` is the value stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Every persisted entity kind. Doubles as the content type a `Category`
/// classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Company,
    Link,
    Type,
    Qualification,
    MountingType,
    LifecycleState,
    Package,
    Library,
    FNode,
    BaseComponent,
    Component,
    OrderedLink,
    OrderedFNode,
    AnnotatedQualification,
    Review,
    Category,
    Tag,
}

impl EntityKind {
    pub const ALL: [Self; 18] = [
        Self::User,
        Self::Company,
        Self::Link,
        Self::Type,
        Self::Qualification,
        Self::MountingType,
        Self::LifecycleState,
        Self::Package,
        Self::Library,
        Self::FNode,
        Self::BaseComponent,
        Self::Component,
        Self::OrderedLink,
        Self::OrderedFNode,
        Self::AnnotatedQualification,
        Self::Review,
        Self::Category,
        Self::Tag,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Company => "company",
            Self::Link => "link",
            Self::Type => "type",
            Self::Qualification => "qualification",
            Self::MountingType => "mounting_type",
            Self::LifecycleState => "lifecycle_state",
            Self::Package => "package",
            Self::Library => "library",
            Self::FNode => "f_node",
            Self::BaseComponent => "base_component",
            Self::Component => "component",
            Self::OrderedLink => "ordered_link",
            Self::OrderedFNode => "ordered_f_node",
            Self::AnnotatedQualification => "annotated_qualification",
            Self::Review => "review",
            Self::Category => "category",
            Self::Tag => "tag",
        }
    }

    /// Display name of the kind, as a type name.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Company => "Company",
            Self::Link => "Link",
            Self::Type => "Type",
            Self::Qualification => "Qualification",
            Self::MountingType => "MountingType",
            Self::LifecycleState => "LifecycleState",
            Self::Package => "Package",
            Self::Library => "Library",
            Self::FNode => "FNode",
            Self::BaseComponent => "BaseComponent",
            Self::Component => "Component",
            Self::OrderedLink => "OrderedLink",
            Self::OrderedFNode => "OrderedFNode",
            Self::AnnotatedQualification => "AnnotatedQualification",
            Self::Review => "Review",
            Self::Category => "Category",
            Self::Tag => "Tag",
        }
    }

    /// Whether rows of this kind carry `AuditFields`.
    #[must_use]
    pub const fn is_audited(self) -> bool {
        matches!(self, Self::Component)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LookupKind
// ---------------------------------------------------------------------------

/// Enum-like reference rows sharing the `(name, description, full_name)` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    Type,
    Qualification,
    MountingType,
    LifecycleState,
}

impl LookupKind {
    pub const ALL: [Self; 4] = [
        Self::Type,
        Self::Qualification,
        Self::MountingType,
        Self::LifecycleState,
    ];

    #[must_use]
    pub const fn entity(self) -> EntityKind {
        match self {
            Self::Type => EntityKind::Type,
            Self::Qualification => EntityKind::Qualification,
            Self::MountingType => EntityKind::MountingType,
            Self::LifecycleState => EntityKind::LifecycleState,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.entity().as_str()
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WebKind
// ---------------------------------------------------------------------------

/// Entities identified by a `(name, url)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WebKind {
    Company,
    Link,
}

impl WebKind {
    #[must_use]
    pub const fn entity(self) -> EntityKind {
        match self {
            Self::Company => EntityKind::Company,
            Self::Link => EntityKind::Link,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.entity().as_str()
    }
}

impl fmt::Display for WebKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MembershipKind
// ---------------------------------------------------------------------------

/// Ordered join tables hanging off a base component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MembershipKind {
    Link,
    FNode,
}

impl MembershipKind {
    #[must_use]
    pub const fn entity(self) -> EntityKind {
        match self {
            Self::Link => EntityKind::OrderedLink,
            Self::FNode => EntityKind::OrderedFNode,
        }
    }

    /// Kind of the child row a membership points at.
    #[must_use]
    pub const fn child(self) -> EntityKind {
        match self {
            Self::Link => EntityKind::Link,
            Self::FNode => EntityKind::FNode,
        }
    }

    /// Stem of the human position label (`"Link"`, `"Link 3"`).
    #[must_use]
    pub const fn label_stem(self) -> &'static str {
        match self {
            Self::Link => "Link",
            Self::FNode => "FNode Ref",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.entity().as_str()
    }
}

impl fmt::Display for MembershipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ComponentOrder
// ---------------------------------------------------------------------------

/// Read ordering for audited collections. Newest first unless overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComponentOrder {
    #[default]
    CreatedDesc,
    CreatedAsc,
    LastModifiedDesc,
}

impl ComponentOrder {
    /// SQL `ORDER BY` body. The id tiebreak keeps equal timestamps stable.
    #[must_use]
    pub const fn order_by(self) -> &'static str {
        match self {
            Self::CreatedDesc => "c.created DESC, c.id DESC",
            Self::CreatedAsc => "c.created ASC, c.id ASC",
            Self::LastModifiedDesc => "c.last_modified DESC, c.id DESC",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedDesc => "created_desc",
            Self::CreatedAsc => "created_asc",
            Self::LastModifiedDesc => "last_modified_desc",
        }
    }
}

impl fmt::Display for ComponentOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
