//! Core rename pipeline, extracted from the CLI.
//!
//! The entry points are I/O-agnostic: discovery, file access and artifact
//! output all go through port traits.

use crate::ports::{CandidateSource, WritePort};
use crate::settings::RunSettings;
use anyhow::Context;
use chrono::Utc;
use diffy::PatchFormatter;
use prefixer_domain::{
    RenameOptions, RenameTable, RunObserver, Scheduler, SchedulerError, SourceStore, Termination,
    TextChange,
};
use prefixer_render::render_report_md;
use prefixer_types::report::{RunInfo, RunReport, ToolInfo};
use tracing::{debug, info};

/// Error type for setup failures. Per-file problems never end up here.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of `run_rename`.
#[derive(Debug)]
pub struct RenameOutcome {
    pub report: RunReport,
    /// Unified diff of every file that would change; only filled in dry-run.
    pub patch: String,
    /// Set when the batch ended early (unsatisfiable or companion abort).
    pub failure: Option<SchedulerError>,
}

impl RenameOutcome {
    /// 2 for an unsatisfiable batch, 1 for any other failure, else 0.
    pub fn exit_code(&self) -> u8 {
        match &self.failure {
            Some(err) => err.exit_code(),
            None if self.report.summary.has_failures() => 1,
            None => 0,
        }
    }
}

/// Rename every candidate the source yields.
///
/// The caller writes artifacts, via `write_report_artifacts` or otherwise.
pub fn run_rename(
    settings: &RunSettings,
    candidates: &dyn CandidateSource,
    store: &dyn SourceStore,
    observer: &dyn RunObserver,
    tool: ToolInfo,
) -> Result<RenameOutcome, ToolError> {
    if settings.prefix.is_empty() {
        return Err(ToolError::InvalidSettings("prefix must not be empty".to_string()));
    }
    if settings.file_suffix.is_empty() {
        return Err(ToolError::InvalidSettings("file suffix must not be empty".to_string()));
    }

    let started_at = Utc::now();
    let paths = candidates.candidates().context("collect candidates")?;
    debug!(count = paths.len(), root = %settings.root, "collected candidates");

    let opts = RenameOptions {
        prefix: settings.prefix.clone(),
        dry_run: settings.dry_run,
        record_changes: settings.dry_run,
        file_suffix: settings.file_suffix.clone(),
        companion_suffix: settings.companion_suffix.clone(),
        companion_policy: settings.companion_policy,
    };
    let mut table = RenameTable::new();
    let batch = Scheduler::new(store, observer, opts).run(paths, &mut table);

    let mut report = RunReport::new(
        tool,
        RunInfo {
            started_at: Some(started_at),
            ended_at: None,
            root: settings.root.to_string(),
            prefix: settings.prefix.clone(),
            dry_run: settings.dry_run,
        },
    );
    report.renames = table.to_map();
    if let Termination::Unsatisfiable { blocked } = &batch.termination {
        report.blocked = blocked.clone();
    }
    report.results = batch.results.clone();
    report.finalize(batch.sweeps);
    report.run.ended_at = Some(Utc::now());

    let patch = render_patch(&batch.changes);
    let failure = batch.check().err();

    info!(
        renamed = report.summary.renamed,
        skipped = report.summary.skipped,
        failed = report.summary.failed,
        companion_failed = report.summary.companion_failed,
        blocked = report.summary.blocked,
        sweeps = report.summary.sweeps,
        "rename finished"
    );

    Ok(RenameOutcome {
        report,
        patch,
        failure,
    })
}

/// Write `report.json`, `report.md` and, when there is one, `patch.diff`.
pub fn write_report_artifacts(
    outcome: &RenameOutcome,
    out_dir: &camino::Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let report_json =
        serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), report_json.as_bytes())?;

    let report_md = render_report_md(&outcome.report);
    writer.write_file(&out_dir.join("report.md"), report_md.as_bytes())?;

    if !outcome.patch.is_empty() {
        writer.write_file(&out_dir.join("patch.diff"), outcome.patch.as_bytes())?;
    }

    debug!(out_dir = %out_dir, "wrote report artifacts");
    Ok(())
}

fn render_patch(changes: &[TextChange]) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for change in changes {
        if change.before == change.after {
            continue;
        }

        out.push_str(&format!("diff --git a/{0} b/{0}\n", change.path));
        out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", change.path));

        let patch = diffy::create_patch(&change.before, &change.after);
        out.push_str(&formatter.fmt_patch(&patch).to_string());
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
