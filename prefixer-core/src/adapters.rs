//! Default filesystem-backed port implementations.

use crate::ports::{CandidateSource, WritePort};
use crate::scan::scan_candidates;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;

/// Walks a directory tree for generated files.
#[derive(Debug, Clone)]
pub struct FsCandidateSource {
    pub root: Utf8PathBuf,
    pub file_suffix: String,
    pub companion_suffix: String,
}

impl CandidateSource for FsCandidateSource {
    fn candidates(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        scan_candidates(&self.root, &self.file_suffix, &self.companion_suffix)
            .with_context(|| format!("scan {}", self.root))
    }
}

/// Fixed candidate list for embedding and testing. Sorted on construction to
/// match `FsCandidateSource`.
#[derive(Debug, Clone)]
pub struct InMemoryCandidateSource {
    paths: Vec<Utf8PathBuf>,
}

impl InMemoryCandidateSource {
    pub fn new(mut paths: Vec<Utf8PathBuf>) -> Self {
        paths.sort();
        paths.dedup();
        Self { paths }
    }
}

impl CandidateSource for InMemoryCandidateSource {
    fn candidates(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        Ok(self.paths.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
