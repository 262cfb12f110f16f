use serde::{Deserialize, Serialize};

/// What a failed companion patch does to the rest of the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanionPolicy {
    /// Report the companion as failed and keep going.
    #[default]
    Report,
    /// Stop the batch after the failing file.
    Abort,
}

impl CompanionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CompanionPolicy::Report => "report",
            CompanionPolicy::Abort => "abort",
        }
    }
}
