use prefixer_render::render_report_md;
use prefixer_types::outcome::{BlockedFile, FileChange, FileResult, OutcomeKind};
use prefixer_types::report::{RunInfo, RunReport, ToolInfo};

fn report() -> RunReport {
    RunReport::new(
        ToolInfo {
            name: "proto-prefixer".to_string(),
            version: Some("0.1.0".to_string()),
        },
        RunInfo {
            root: "gen".to_string(),
            prefix: "acme/".to_string(),
            ..RunInfo::default()
        },
    )
}

#[test]
fn empty_run_says_nothing_renamed() {
    let mut r = report();
    r.finalize(0);
    let md = render_report_md(&r);
    assert!(md.starts_with("# proto-prefixer run\n"));
    assert!(md.contains("- Status: `pass`"));
    assert!(md.contains("_No descriptors renamed._"));
    assert!(!md.contains("## Failures"));
}

#[test]
fn renames_failures_and_blocks_are_listed() {
    let mut r = report();
    let mut renamed = FileResult::renamed("gen/b.pb.go".into(), "api/b.proto", "acme/api/b.proto");
    renamed.files.push(FileChange {
        path: "gen/b.pb.go".into(),
        sha256_before: "aa".to_string(),
        sha256_after: "bb".to_string(),
        bytes_before: 10,
        bytes_after: 20,
    });
    r.results.push(renamed);
    r.results.push(FileResult::failed(
        "gen/x.pb.go".into(),
        "decode_failure",
        "truncated",
    ));
    r.results
        .push(FileResult::new("gen/a.pb.go".into(), OutcomeKind::Blocked));
    r.renames
        .insert("api/b.proto".to_string(), "acme/api/b.proto".to_string());
    r.blocked.push(BlockedFile {
        path: "gen/a.pb.go".into(),
        dependency: "api/c.proto".to_string(),
    });
    r.finalize(2);

    let md = render_report_md(&r);
    assert!(md.contains("- Status: `unsatisfiable`"));
    assert!(md.contains("- Sweeps: 2"));
    assert!(md.contains("| `api/b.proto` | `acme/api/b.proto` |"));
    assert!(md.contains("- `gen/x.pb.go` `decode_failure`: truncated"));
    assert!(md.contains("- `gen/a.pb.go` depends on `api/c.proto`"));
    assert!(md.contains("- `gen/b.pb.go` aa → bb"));
}

#[test]
fn dry_run_is_called_out() {
    let mut r = report();
    r.run.dry_run = true;
    r.finalize(1);
    assert!(render_report_md(&r).contains("dry run"));
}
