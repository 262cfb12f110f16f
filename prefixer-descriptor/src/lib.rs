//! Descriptor codec for proto-prefixer.
//!
//! Responsibilities:
//! - Decode a serialized `FileDescriptorProto` far enough to expose its `name`
//!   and `dependency` list.
//! - Re-encode a (possibly mutated) record, carrying every other field through
//!   as its original wire bytes.
//! - Derive the namespace group used to scope dependency renames.
//!
//! This crate knows nothing about how the payload is embedded in source text.

mod codec;
mod error;
mod namespace;

pub use codec::{DEPENDENCY_TAG, DescriptorRecord, NAME_TAG, decode, encode};
pub use error::CodecError;
pub use namespace::{co_located, namespace_group};
