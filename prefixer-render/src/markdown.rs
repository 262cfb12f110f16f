use prefixer_types::outcome::OutcomeKind;
use prefixer_types::report::{RunReport, RunStatus};

pub fn render_report_md(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("# proto-prefixer run\n\n");
    out.push_str(&format!("- Status: `{}`\n", status_label(report.status)));
    out.push_str(&format!("- Prefix: `{}`\n", report.run.prefix));
    out.push_str(&format!("- Root: `{}`\n", report.run.root));
    if report.run.dry_run {
        out.push_str("- Mode: dry run (nothing written)\n");
    }
    let s = &report.summary;
    out.push_str(&format!(
        "- Candidates: {}\n- Renamed: {}\n- Skipped: {}\n- Failed: {}\n- Blocked: {}\n- Sweeps: {}\n",
        s.candidates, s.renamed, s.skipped, s.failed, s.blocked, s.sweeps
    ));
    if s.companion_failed > 0 {
        out.push_str(&format!("- Companion failures: {}\n", s.companion_failed));
    }
    out.push('\n');

    out.push_str("## Renames\n\n");
    if report.renames.is_empty() {
        out.push_str("_No descriptors renamed._\n\n");
    } else {
        out.push_str("| Original | Prefixed |\n|---|---|\n");
        for (from, to) in &report.renames {
            out.push_str(&format!("| `{}` | `{}` |\n", from, to));
        }
        out.push('\n');
    }

    let problems: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.outcome == OutcomeKind::Failed)
        .collect();
    if !problems.is_empty() {
        out.push_str("## Failures\n\n");
        for r in problems {
            out.push_str(&format!(
                "- `{}` `{}`: {}\n",
                r.path,
                r.error_kind.as_deref().unwrap_or("-"),
                r.message.as_deref().unwrap_or("-")
            ));
        }
        out.push('\n');
    }

    if !report.blocked.is_empty() {
        out.push_str("## Blocked\n\n");
        for b in &report.blocked {
            out.push_str(&format!("- `{}` depends on `{}`\n", b.path, b.dependency));
        }
        out.push('\n');
    }

    let changed: Vec<_> = report.results.iter().flat_map(|r| &r.files).collect();
    if !changed.is_empty() {
        out.push_str("## Files changed\n\n");
        for fc in changed {
            out.push_str(&format!(
                "- `{}` {} → {}\n",
                fc.path, fc.sha256_before, fc.sha256_after
            ));
        }
    }

    out
}

fn status_label(s: RunStatus) -> &'static str {
    match s {
        RunStatus::Pass => "pass",
        RunStatus::Fail => "fail",
        RunStatus::Unsatisfiable => "unsatisfiable",
    }
}
