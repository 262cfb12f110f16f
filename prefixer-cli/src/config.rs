//! Configuration file loading for proto-prefixer.
//!
//! Discovers and loads `proto-prefixer.toml` from the scanned directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use prefixer_types::policy::CompanionPolicy;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "proto-prefixer.toml";

/// Top-level configuration from proto-prefixer.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PrefixerConfig {
    pub rename: RenameConfig,
    pub output: OutputConfig,
}

/// Rename section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Prefix used when none is given on the command line.
    pub prefix: Option<String>,

    /// Suffix of generated descriptor files.
    pub file_suffix: String,

    /// Suffix of companion service files, which are never candidates.
    pub companion_suffix: String,

    /// What a failed companion patch does to the batch.
    pub companion_failure: CompanionPolicy,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            file_suffix: ".pb.go".to_string(),
            companion_suffix: "_grpc.pb.go".to_string(),
            companion_failure: CompanionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub verbose: bool,
}

/// Look for `proto-prefixer.toml` directly inside `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a proto-prefixer.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<PrefixerConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<PrefixerConfig> {
    let config: PrefixerConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config if given, else the discovered one, else defaults.
pub fn load_or_default(
    root: &Utf8Path,
    explicit: Option<&Utf8Path>,
) -> anyhow::Result<PrefixerConfig> {
    match explicit.map(Utf8Path::to_path_buf).or_else(|| discover_config(root)) {
        Some(path) => load_config(&path),
        None => Ok(PrefixerConfig::default()),
    }
}

/// Configuration after CLI arguments have been applied.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// `None` when neither the CLI nor the file names a prefix.
    pub prefix: Option<String>,
    pub file_suffix: String,
    pub companion_suffix: String,
    pub companion_policy: CompanionPolicy,
    pub verbose: bool,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: PrefixerConfig,
}

impl ConfigMerger {
    pub fn new(config: PrefixerConfig) -> Self {
        Self { config }
    }

    /// CLI values win when given; `verbose` is on if either side enables it.
    pub fn merge_args(
        self,
        cli_prefix: Option<String>,
        cli_companion_failure: Option<CompanionPolicy>,
        cli_verbose: bool,
    ) -> MergedConfig {
        let rename = self.config.rename;
        MergedConfig {
            prefix: cli_prefix
                .or(rename.prefix)
                .filter(|p| !p.is_empty()),
            file_suffix: rename.file_suffix,
            companion_suffix: rename.companion_suffix,
            companion_policy: cli_companion_failure.unwrap_or(rename.companion_failure),
            verbose: cli_verbose || self.config.output.verbose,
        }
    }
}
