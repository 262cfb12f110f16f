//! Error types for prefixer-descriptor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// The protobuf wire layer rejected a key or varint.
    #[error("wire decode error: {0}")]
    Wire(#[from] prost::DecodeError),

    /// A length-delimited or fixed-width field runs past the end of the payload.
    #[error("truncated field: need {needed} bytes, {remaining} remaining")]
    Truncated { needed: u64, remaining: usize },

    #[error("field `{field}` is not valid utf-8")]
    InvalidUtf8 { field: &'static str },

    #[error("descriptor has no name")]
    MissingName,

    /// An end-group key without a matching start, or closing a different field.
    #[error("unbalanced group for field {tag}")]
    UnbalancedGroup { tag: u32 },
}
