//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields change the stored row. `Option<Option<T>>` fields distinguish "leave
//! alone" (`None`) from "clear" (`Some(None)`).

pub mod component;
pub mod lookup;
pub mod web;
