use crate::outcome::{BlockedFile, FileResult, OutcomeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    pub root: String,
    pub prefix: String,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every target renamed (or legitimately skipped).
    Pass,
    /// At least one per-file hard error.
    Fail,
    /// The fixed point stalled on missing or cyclic dependencies.
    Unsatisfiable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub candidates: u64,
    pub renamed: u64,
    pub skipped: u64,
    pub failed: u64,
    #[serde(default)]
    pub companion_failed: u64,
    pub blocked: u64,
    pub sweeps: u64,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.companion_failed > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub status: RunStatus,
    pub summary: RunSummary,

    #[serde(default)]
    pub results: Vec<FileResult>,

    /// Original name to prefixed name, for every committed file.
    #[serde(default)]
    pub renames: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked: Vec<BlockedFile>,
}

impl RunReport {
    pub fn new(tool: ToolInfo, run: RunInfo) -> Self {
        Self {
            schema: crate::schema::PREFIXER_REPORT_V1.to_string(),
            tool,
            run,
            status: RunStatus::Pass,
            summary: RunSummary::default(),
            results: vec![],
            renames: BTreeMap::new(),
            blocked: vec![],
        }
    }

    /// Recompute `summary` and `status` from `results` and `blocked`.
    pub fn finalize(&mut self, sweeps: u64) {
        let mut summary = RunSummary {
            sweeps,
            ..RunSummary::default()
        };
        for r in &self.results {
            if r.is_companion_failure() {
                summary.companion_failed += 1;
                continue;
            }
            summary.candidates += 1;
            match r.outcome {
                OutcomeKind::Renamed => summary.renamed += 1,
                OutcomeKind::NotATarget | OutcomeKind::AlreadyProcessed => summary.skipped += 1,
                OutcomeKind::Failed => summary.failed += 1,
                OutcomeKind::Blocked => summary.blocked += 1,
            }
        }

        self.status = if !self.blocked.is_empty() {
            RunStatus::Unsatisfiable
        } else if summary.has_failures() {
            RunStatus::Fail
        } else {
            RunStatus::Pass
        };
        self.summary = summary;
    }
}
