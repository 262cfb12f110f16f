//! Shared DTOs (schemas-as-code) for the proto-prefixer workspace.
//!
//! # Design constraints
//! - These types are serialized to disk as run artifacts.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod outcome;
pub mod policy;
pub mod report;

/// Schema identifiers.
pub mod schema {
    pub const PREFIXER_REPORT_V1: &str = "prefixer.report.v1";
}
