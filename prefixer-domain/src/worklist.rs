use camino::{Utf8Path, Utf8PathBuf};
use prefixer_types::outcome::BlockedFile;
use std::collections::BTreeMap;

/// Ordered files still to be processed, with a cursor and per-sweep progress
/// tracking.
///
/// A sweep is one pass of the cursor over the current entries. Deferring an
/// entry advances the cursor and leaves it in place, so it comes around again
/// on the next sweep; finishing an entry removes it. When the cursor wraps and
/// the length is the same as at the start of the sweep, nothing can move any
/// more and [`Step::Stalled`] lists every entry with the dependency that
/// blocked it.
#[derive(Debug)]
pub struct Worklist<T> {
    entries: Vec<(Utf8PathBuf, T)>,
    cursor: usize,
    sweep_len: usize,
    sweeps: u64,
    blocked: BTreeMap<Utf8PathBuf, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The entry under the cursor should be visited.
    Visit,
    Stalled(Vec<BlockedFile>),
    Done,
}

impl<T> Worklist<T> {
    pub fn new(entries: Vec<(Utf8PathBuf, T)>) -> Self {
        let sweep_len = entries.len();
        Self {
            sweeps: u64::from(!entries.is_empty()),
            entries,
            cursor: 0,
            sweep_len,
            blocked: BTreeMap::new(),
        }
    }

    pub fn step(&mut self) -> Step {
        if self.entries.is_empty() {
            return Step::Done;
        }

        if self.cursor >= self.entries.len() {
            if self.sweep_len == self.entries.len() {
                return Step::Stalled(self.blocked_files());
            }
            self.cursor = 0;
            self.blocked.clear();
            self.sweep_len = self.entries.len();
            self.sweeps += 1;
        }

        Step::Visit
    }

    /// Entry under the cursor. Only valid right after [`Step::Visit`].
    pub fn current(&mut self) -> (&Utf8Path, &mut T) {
        let (path, value) = &mut self.entries[self.cursor];
        (path.as_path(), value)
    }

    /// Leave the current entry for a later sweep.
    pub fn defer(&mut self, dependency: impl Into<String>) {
        let path = self.entries[self.cursor].0.clone();
        self.blocked.insert(path, dependency.into());
        self.cursor += 1;
    }

    /// Remove the current entry; the cursor now points at its successor.
    pub fn finish_current(&mut self) -> (Utf8PathBuf, T) {
        self.entries.remove(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sweeps started so far, including the current one.
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    fn blocked_files(&self) -> Vec<BlockedFile> {
        self.blocked
            .iter()
            .map(|(path, dependency)| BlockedFile {
                path: path.clone(),
                dependency: dependency.clone(),
            })
            .collect()
    }
}
