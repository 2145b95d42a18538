//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `registry.rs` — corpus scan + (scheme, implementation) resolution.
//! - `metadata.rs` — duplicate-consistency document lookup and parsing.
//! - `discovery.rs` — flattening metadata into comparison tasks.
//! - `compare.rs` — prefix-stripping comparison + mismatch reports.
//! - `diff.rs` — unified line diff used in mismatch reports.
//! - `filter.rs` — skip/xfail policy keyed by task id.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod compare;
pub mod diff;
pub mod discovery;
pub mod filter;
pub mod metadata;
pub mod output;
pub mod registry;

use std::path::PathBuf;

/// Failure taxonomy for the checker services.
///
/// Mismatched file content is not an error here; it travels as a
/// `MismatchReport` inside the run report. These variants cover broken
/// declarations and broken corpus state.
#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    #[error("no such implementation: {scheme}/{implementation}")]
    Resolution {
        scheme: String,
        implementation: String,
    },
    #[error("{document}: {reason}")]
    MetadataFormat { document: String, reason: String },
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
