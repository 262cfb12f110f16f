//! Text layer for proto-prefixer.
//!
//! Responsibilities:
//! - Locate the source header, descriptor variable and raw byte block in a
//!   generated `.pb.go` file and decode the embedded payload.
//! - Splice a re-encoded payload back, touching only the marker line and the
//!   byte block.
//! - Keep the `Metadata:` line of a companion `_grpc.pb.go` file in sync.
//!
//! Everything here is pure `&str -> String`; reading and writing files is the
//! caller's job.

mod companion;
mod error;
mod extract;
mod splice;

pub use companion::{METADATA_PATTERN, companion_path, patch_companion};
pub use error::{CompanionError, ExtractError};
pub use extract::{ExtractedRegions, Extraction, MARKER, extract};
pub use splice::{BYTES_PER_ROW, format_rows, marker_line, splice};
