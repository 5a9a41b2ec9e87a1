//! # parts-core
//!
//! Core types for the parts catalog.
//!
//! This crate provides the foundational types shared across all catalog crates:
//! - Entity structs for components and their reference data
//! - Entity kind enums and per-kind storage/relation names
//! - Audit stamping rules (`created` / `last_modified` semantics)
//! - Per-parent ordering arithmetic for membership rows
//! - The pluralization rule used for relation naming
//! - A clock seam so timestamps can be controlled in tests
//! - Cross-cutting error types

pub mod audit;
pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod naming;
pub mod ordering;
