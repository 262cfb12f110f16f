//! Embeddable core library for proto-prefixer.
//!
//! Provides a clap-free, I/O-abstracted entry point so the rename can run
//! inside another host process as well as behind the CLI.
//!
//! # Port traits
//!
//! Candidate discovery and artifact writing are abstracted in [`ports`]:
//! - [`CandidateSource`](ports::CandidateSource) lists the files to rename
//! - [`WritePort`](ports::WritePort) writes report artifacts
//!
//! Reading and rewriting the candidates goes through
//! [`SourceStore`](prefixer_domain::SourceStore). The [`adapters`] module
//! provides filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`run_rename`](pipeline::run_rename) renames a batch and builds the report
//! - [`write_report_artifacts`](pipeline::write_report_artifacts) persists it

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod scan;
pub mod settings;

// Re-exported so embedders don't need prefixer-domain directly.
pub use prefixer_domain::{
    FsSourceStore, MemorySourceStore, NoopObserver, RunObserver, SourceStore,
};
