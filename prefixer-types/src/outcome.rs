use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Error kind recorded for a `_grpc.pb.go` companion that could not be patched.
pub const COMPANION_FAILURE: &str = "companion_failure";

/// How one candidate file left the worklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Descriptor renamed and written back.
    Renamed,
    /// No generated-descriptor landmarks; ignored.
    NotATarget,
    /// Marker line already present; ignored.
    AlreadyProcessed,
    /// Per-file hard error; the file was dropped.
    Failed,
    /// Still waiting on a co-located dependency when the batch stalled.
    Blocked,
}

impl OutcomeKind {
    pub fn is_error(self) -> bool {
        matches!(self, OutcomeKind::Failed | OutcomeKind::Blocked)
    }

    /// Informational outcomes are only surfaced in verbose mode.
    pub fn is_skip(self) -> bool {
        matches!(self, OutcomeKind::NotATarget | OutcomeKind::AlreadyProcessed)
    }
}

/// Per-file structured result handed to the reporting layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub path: Utf8PathBuf,
    pub outcome: OutcomeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,

    /// Error kind token (e.g. `malformed_block`) for failed files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Dependencies rewritten to their prefixed names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies_rewritten: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileChange>,
}

impl FileResult {
    pub fn new(path: Utf8PathBuf, outcome: OutcomeKind) -> Self {
        Self {
            path,
            outcome,
            original_name: None,
            new_name: None,
            error_kind: None,
            message: None,
            dependencies_rewritten: vec![],
            files: vec![],
        }
    }

    pub fn renamed(path: Utf8PathBuf, from: &str, to: &str) -> Self {
        let mut r = Self::new(path, OutcomeKind::Renamed);
        r.original_name = Some(from.to_string());
        r.new_name = Some(to.to_string());
        r
    }

    pub fn failed(path: Utf8PathBuf, error_kind: &str, message: impl Into<String>) -> Self {
        let mut r = Self::new(path, OutcomeKind::Failed);
        r.error_kind = Some(error_kind.to_string());
        r.message = Some(message.into());
        r
    }

    /// Companion failures ride along with the base file's commit; they are
    /// not candidates of their own.
    pub fn is_companion_failure(&self) -> bool {
        self.outcome == OutcomeKind::Failed && self.error_kind.as_deref() == Some(COMPANION_FAILURE)
    }
}

/// A file written (or, in dry-run, that would be written) by a rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    pub path: Utf8PathBuf,
    pub sha256_before: String,
    pub sha256_after: String,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

/// A file left on the worklist when a full sweep made no progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedFile {
    pub path: Utf8PathBuf,
    pub dependency: String,
}
