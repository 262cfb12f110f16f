use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use prefixer_types::outcome::FileResult;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Read/write access to the files of one batch.
///
/// The scheduler only talks to this trait so it can run against an in-memory
/// tree in tests.
pub trait SourceStore {
    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String>;

    /// Replace the whole file. Not atomic: a failure may leave it truncated.
    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()>;

    fn exists(&self, path: &Utf8Path) -> bool;
}

/// File-system backed `SourceStore`.
#[derive(Debug, Clone, Default)]
pub struct FsSourceStore;

impl SourceStore for FsSourceStore {
    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("read {}", path))
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn exists(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }
}

/// In-memory `SourceStore` for embedding and testing.
#[derive(Debug, Default)]
pub struct MemorySourceStore {
    files: RefCell<BTreeMap<Utf8PathBuf, String>>,
    writes: RefCell<Vec<Utf8PathBuf>>,
}

impl MemorySourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    pub fn get(&self, path: &Utf8Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Paths written so far, in write order.
    pub fn writes(&self) -> Vec<Utf8PathBuf> {
        self.writes.borrow().clone()
    }
}

impl SourceStore for MemorySourceStore {
    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String> {
        self.get(path)
            .with_context(|| format!("read {}: no such file", path))
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        self.writes.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Utf8Path) -> bool {
        self.files.borrow().contains_key(path)
    }
}

/// Progress callbacks, invoked as the batch runs.
pub trait RunObserver {
    /// A file left the worklist (renamed, skipped or failed).
    fn on_result(&self, _result: &FileResult) {}

    /// A file was pushed to a later sweep.
    fn on_deferred(&self, _path: &Utf8Path, _dependency: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
