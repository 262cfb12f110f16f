//! Port traits abstracting discovery and artifact output away from the pipeline.

use camino::{Utf8Path, Utf8PathBuf};

/// Produces the candidate file list for one run.
pub trait CandidateSource {
    fn candidates(&self) -> anyhow::Result<Vec<Utf8PathBuf>>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
