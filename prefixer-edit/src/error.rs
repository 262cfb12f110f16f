//! Error types for prefixer-edit.
//!
//! Every [`ExtractError`] means the file looked like a generated descriptor
//! file but its layout could not be trusted; callers report it as a
//! malformed block and drop the file.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("descriptor variable found but no `// source:` header")]
    MissingHeader,

    #[error("source header found but no `protoreflect.FileDescriptor` variable")]
    MissingDescriptorVar,

    #[error("no raw descriptor block for `{var}`")]
    MissingBlock { var: String },

    #[error("raw descriptor block at line {line} has no data")]
    EmptyBlock { line: usize },

    #[error("uncompleted data: block starting at line {line} is never closed")]
    Unterminated { line: usize },

    #[error("`// source:` header at line {header} sits inside the block opened at line {block}")]
    HeaderAfterBlock { header: usize, block: usize },

    #[error("invalid hex data at line {line}: `{token}`")]
    InvalidToken { line: usize, token: String },

    #[error("invalid declaration pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
pub enum CompanionError {
    /// The companion file exists but has no `Metadata:` line.
    #[error("unrecognized companion format: no `Metadata:` line")]
    MissingMetadata,

    /// The companion references a different descriptor than the one renamed.
    #[error("unexpected metadata value: expected `{expected}`, found `{found}`")]
    UnexpectedMetadata { expected: String, found: String },
}
