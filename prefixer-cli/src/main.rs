mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{CommandFactory, Parser};
use config::{ConfigMerger, PrefixerConfig};
use prefixer_core::adapters::{FsCandidateSource, FsWritePort};
use prefixer_core::pipeline::{ToolError, run_rename, write_report_artifacts};
use prefixer_core::settings::RunSettings;
use prefixer_core::{FsSourceStore, RunObserver};
use prefixer_render::{deferred_line, result_line, unsatisfiable_lines};
use prefixer_types::outcome::FileResult;
use prefixer_types::policy::CompanionPolicy;
use prefixer_types::report::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "proto-prefixer",
    version,
    about = "Prefix protobuf descriptor names embedded in generated Go sources."
)]
struct Cli {
    /// Directory scanned recursively for generated `.pb.go` files.
    dir: Utf8PathBuf,

    /// Prepended to every descriptor name (e.g. "acme/"). Falls back to
    /// `rename.prefix` in proto-prefixer.toml.
    prefix: Option<String>,

    /// Show renames, skips and deferrals, and enable debug logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Compute every rename but write nothing; print a patch instead.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write report.json, report.md and (in dry-run) patch.diff here.
    #[arg(long)]
    report_dir: Option<Utf8PathBuf>,

    /// What a failed companion `_grpc.pb.go` patch does to the batch.
    #[arg(long, value_enum)]
    companion_failure: Option<CompanionFailure>,

    /// Config file (default: <DIR>/proto-prefixer.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CompanionFailure {
    Report,
    Abort,
}

impl From<CompanionFailure> for CompanionPolicy {
    fn from(value: CompanionFailure) -> Self {
        match value {
            CompanionFailure::Report => CompanionPolicy::Report,
            CompanionFailure::Abort => CompanionPolicy::Abort,
        }
    }
}

/// Prints per-file lines as the batch runs.
struct ConsoleObserver {
    verbose: bool,
}

impl RunObserver for ConsoleObserver {
    fn on_result(&self, result: &FileResult) {
        let Some(line) = result_line(result, self.verbose) else {
            return;
        };
        if result.outcome.is_error() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn on_deferred(&self, path: &Utf8Path, dependency: &str) {
        if self.verbose {
            println!("{}", deferred_line(path.as_str(), dependency));
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let file_config = config::load_or_default(&cli.dir, cli.config.as_deref());
    let verbose = cli.verbose
        || file_config
            .as_ref()
            .is_ok_and(|config| config.output.verbose);
    init_tracing(verbose);

    match file_config
        .context("load proto-prefixer.toml config")
        .and_then(|file_config| real_main(cli, file_config))
    {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn real_main(cli: Cli, file_config: PrefixerConfig) -> anyhow::Result<u8> {
    let merged = ConfigMerger::new(file_config).merge_args(
        cli.prefix,
        cli.companion_failure.map(CompanionPolicy::from),
        cli.verbose,
    );
    debug!(
        "merged config: prefix={:?}, file_suffix={}, companion_suffix={}, companion_policy={}",
        merged.prefix,
        merged.file_suffix,
        merged.companion_suffix,
        merged.companion_policy.as_str()
    );

    let Some(prefix) = merged.prefix else {
        eprintln!("error: no prefix given on the command line or in {}", config::CONFIG_FILE_NAME);
        eprintln!("{}", Cli::command().render_usage());
        return Ok(1);
    };

    let settings = RunSettings {
        root: cli.dir,
        prefix,
        file_suffix: merged.file_suffix,
        companion_suffix: merged.companion_suffix,
        dry_run: cli.dry_run,
        companion_policy: merged.companion_policy,
        report_dir: cli.report_dir,
    };
    let candidates = FsCandidateSource {
        root: settings.root.clone(),
        file_suffix: settings.file_suffix.clone(),
        companion_suffix: settings.companion_suffix.clone(),
    };
    let observer = ConsoleObserver {
        verbose: merged.verbose,
    };

    let outcome = match run_rename(&settings, &candidates, &FsSourceStore, &observer, tool_info()) {
        Ok(outcome) => outcome,
        Err(ToolError::InvalidSettings(msg)) => {
            eprintln!("error: {msg}");
            eprintln!("{}", Cli::command().render_usage());
            return Ok(1);
        }
        Err(ToolError::Internal(e)) => return Err(e),
    };

    if !outcome.report.blocked.is_empty() {
        for line in unsatisfiable_lines(&outcome.report.blocked) {
            eprintln!("{line}");
        }
    } else if let Some(failure) = &outcome.failure {
        eprintln!("error: {failure}");
    }

    if let Some(dir) = &settings.report_dir {
        write_report_artifacts(&outcome, dir, &FsWritePort)
            .with_context(|| format!("write report artifacts to {}", dir))?;
        info!("wrote report to {}", dir);
    } else if settings.dry_run {
        print!("{}", outcome.patch);
    }

    Ok(outcome.exit_code())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "proto-prefixer".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
