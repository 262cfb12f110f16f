use colored::Colorize;
use prefixer_types::outcome::{BlockedFile, FileResult, OutcomeKind};

pub const UNSATISFIABLE_HEADER: &str =
    "Unable to process following files due to missing dependency, which also should be prefixed:";

/// Console line for one finished file, or `None` when it should stay quiet.
///
/// Failures are always rendered; everything else only when `verbose`.
pub fn result_line(result: &FileResult, verbose: bool) -> Option<String> {
    match result.outcome {
        OutcomeKind::Failed => {
            let kind = result.error_kind.as_deref().unwrap_or("failure");
            let message = result.message.as_deref().unwrap_or_default();
            Some(format!("{}: {} {}", result.path, kind.red().bold(), message))
        }
        _ if !verbose => None,
        OutcomeKind::Renamed => Some(format!(
            "{}: {} {} {}",
            result.path,
            result.original_name.as_deref().unwrap_or_default(),
            "==>".green().bold(),
            result.new_name.as_deref().unwrap_or_default().green()
        )),
        OutcomeKind::NotATarget => Some(format!("{}: {}", result.path, "not a target".dimmed())),
        OutcomeKind::AlreadyProcessed => Some(format!(
            "{}: {}",
            result.path,
            "already processed".yellow()
        )),
        // Listed as a block by `unsatisfiable_lines`.
        OutcomeKind::Blocked => None,
    }
}

pub fn deferred_line(path: &str, dependency: &str) -> String {
    format!(
        "{}: {} '{}', work later",
        path,
        "dependency unprocessed".yellow(),
        dependency
    )
}

/// Header plus one `\t* <file> (depends on '<dep>')` line per blocked file.
pub fn unsatisfiable_lines(blocked: &[BlockedFile]) -> Vec<String> {
    let mut lines = Vec::with_capacity(blocked.len() + 1);
    lines.push(UNSATISFIABLE_HEADER.red().bold().to_string());
    lines.extend(
        blocked
            .iter()
            .map(|b| format!("\t* {} (depends on '{}')", b.path, b.dependency)),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn renamed_line_shows_both_names() {
        plain();
        let r = FileResult::renamed("gen/a.pb.go".into(), "api/a.proto", "acme/api/a.proto");
        assert_eq!(
            result_line(&r, true).as_deref(),
            Some("gen/a.pb.go: api/a.proto ==> acme/api/a.proto")
        );
        assert_eq!(result_line(&r, false), None);
    }

    #[test]
    fn failures_are_shown_without_verbose() {
        plain();
        let r = FileResult::failed("gen/a.pb.go".into(), "malformed_block", "missing header");
        assert_eq!(
            result_line(&r, false).as_deref(),
            Some("gen/a.pb.go: malformed_block missing header")
        );
    }

    #[test]
    fn skips_are_verbose_only() {
        plain();
        let r = FileResult::new("gen/a.pb.go".into(), OutcomeKind::AlreadyProcessed);
        assert_eq!(result_line(&r, false), None);
        assert_eq!(
            result_line(&r, true).as_deref(),
            Some("gen/a.pb.go: already processed")
        );
    }

    #[test]
    fn deferral_names_the_dependency() {
        plain();
        assert_eq!(
            deferred_line("gen/a.pb.go", "api/b.proto"),
            "gen/a.pb.go: dependency unprocessed 'api/b.proto', work later"
        );
    }

    #[test]
    fn unsatisfiable_block_lists_every_file() {
        plain();
        let lines = unsatisfiable_lines(&[
            BlockedFile {
                path: "gen/a.pb.go".into(),
                dependency: "api/c.proto".to_string(),
            },
            BlockedFile {
                path: "gen/d.pb.go".into(),
                dependency: "api/e.proto".to_string(),
            },
        ]);
        assert_eq!(
            lines,
            vec![
                UNSATISFIABLE_HEADER.to_string(),
                "\t* gen/a.pb.go (depends on 'api/c.proto')".to_string(),
                "\t* gen/d.pb.go (depends on 'api/e.proto')".to_string(),
            ]
        );
    }
}
