//! Entity structs for all catalog domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON output and schema
//! validation. Shared shapes (name + description, `(name, url)` identity,
//! lookup rows, audit fields) are composed in rather than inherited.

mod category;
mod component;
mod library;
mod lookup;
mod package;
mod qualification;
mod review;
mod user;
mod web;

pub use category::{Category, Tag};
pub use component::{BaseComponent, Component};
pub use library::{DEFAULT_FNODE_PATH, DEFAULT_LIBRARY_PATH, FNode, Library};
pub use lookup::Lookup;
pub use package::Package;
pub use qualification::AnnotatedQualification;
pub use review::Review;
pub use user::User;
pub use web::WebEntity;

/// Default `name` for entities created without one.
pub const DEFAULT_NAME: &str = "MyName";
