//! Domain logic: decide the order in which generated descriptor files are
//! renamed, and rename them.
//!
//! Dependency edges are only known after a file's payload is decoded, so the
//! [`Scheduler`] runs a worklist to a fixed point: a file whose co-located
//! dependency has not been renamed yet is deferred to a later sweep, and a
//! sweep that shrinks nothing means the batch cannot be satisfied.

mod error;
mod ports;
mod scheduler;
mod table;
mod worklist;

pub use error::{FileError, SchedulerError};
pub use ports::{FsSourceStore, MemorySourceStore, NoopObserver, RunObserver, SourceStore};
pub use scheduler::{BatchOutcome, RenameOptions, Scheduler, Termination, TextChange};
pub use table::RenameTable;
pub use worklist::{Step, Worklist};
