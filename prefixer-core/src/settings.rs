//! Clap-free settings for the rename pipeline.

use camino::Utf8PathBuf;
use prefixer_types::policy::CompanionPolicy;

#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Directory scanned for generated files.
    pub root: Utf8PathBuf,
    pub prefix: String,

    // Discovery
    pub file_suffix: String,
    pub companion_suffix: String,

    // Behaviour
    pub dry_run: bool,
    pub companion_policy: CompanionPolicy,

    /// Where `report.json`, `report.md` and `patch.diff` go, if anywhere.
    pub report_dir: Option<Utf8PathBuf>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            prefix: String::new(),
            file_suffix: ".pb.go".to_string(),
            companion_suffix: "_grpc.pb.go".to_string(),
            dry_run: false,
            companion_policy: CompanionPolicy::default(),
            report_dir: None,
        }
    }
}
