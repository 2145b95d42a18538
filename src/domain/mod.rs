//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep task/report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — implementation descriptors, consistency groups, tasks,
//!   mismatch/run/validation reports, output envelope.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.

pub mod models;
