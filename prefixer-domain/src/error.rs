//! Error types for prefixer-domain.
//!
//! [`FileError`] is a per-file hard error: the file is dropped and the batch
//! continues. [`SchedulerError`] ends the whole batch.

use camino::Utf8PathBuf;
use prefixer_descriptor::CodecError;
use prefixer_edit::ExtractError;
use prefixer_types::outcome::{BlockedFile, COMPANION_FAILURE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("malformed block: {0}")]
    MalformedBlock(#[from] ExtractError),

    #[error("decode failure: {0}")]
    Decode(#[source] CodecError),

    #[error("encode failure: {0}")]
    Encode(#[source] CodecError),

    #[error("io failure: {0:#}")]
    Io(#[source] anyhow::Error),

    /// Another file in this run already claimed the descriptor name.
    #[error("duplicate descriptor name `{name}` (already renamed via {first})")]
    DuplicateName { name: String, first: Utf8PathBuf },

    #[error("companion {path}: {source:#}")]
    Companion {
        path: Utf8PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl FileError {
    /// Stable token for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            FileError::MalformedBlock(_) => "malformed_block",
            FileError::Decode(_) => "decode_failure",
            FileError::Encode(_) => "encode_failure",
            FileError::Io(_) => "io_failure",
            FileError::DuplicateName { .. } => "duplicate_name",
            FileError::Companion { .. } => COMPANION_FAILURE,
        }
    }
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A full sweep renamed nothing: missing or cyclic dependencies.
    #[error("unable to process {} file(s) due to missing dependency", blocked.len())]
    Unsatisfiable { blocked: Vec<BlockedFile> },

    #[error("companion patch failed for {path}: {message}")]
    CompanionAbort { path: Utf8PathBuf, message: String },
}

impl SchedulerError {
    /// Unsatisfiable batches map to exit code 2, everything else to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            SchedulerError::Unsatisfiable { .. } => 2,
            SchedulerError::CompanionAbort { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_snake_case_tokens() {
        let err = FileError::from(ExtractError::MissingHeader);
        assert_eq!(err.kind(), "malformed_block");
        assert!(err.to_string().contains("malformed block"));

        let err = FileError::Io(anyhow::anyhow!("disk full"));
        assert_eq!(err.kind(), "io_failure");
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn unsatisfiable_reports_exit_code_2() {
        let err = SchedulerError::Unsatisfiable {
            blocked: vec![BlockedFile {
                path: Utf8PathBuf::from("api/a.pb.go"),
                dependency: "api/c.proto".to_string(),
            }],
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("1 file(s)"));
    }

    #[test]
    fn companion_abort_reports_exit_code_1() {
        let err = SchedulerError::CompanionAbort {
            path: Utf8PathBuf::from("api/a_grpc.pb.go"),
            message: "unexpected metadata value".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
    }
}
