use crate::error::CompanionError;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::sync::LazyLock;

/// Matches the service descriptor's `Metadata: "api/foo.proto",` line.
pub const METADATA_PATTERN: &str = r#"Metadata:\s+"(\S+)","#;

static METADATA_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(METADATA_PATTERN).expect("metadata regex"));

/// Sibling companion path: `x/foo.pb.go` -> `x/foo_grpc.pb.go`.
///
/// Returns `None` when `base` does not end in `file_suffix`.
pub fn companion_path(
    base: &Utf8Path,
    file_suffix: &str,
    companion_suffix: &str,
) -> Option<Utf8PathBuf> {
    let stem = base.as_str().strip_suffix(file_suffix)?;
    Some(Utf8PathBuf::from(format!("{stem}{companion_suffix}")))
}

/// Rewrite the captured metadata value from `from` to `to`.
///
/// Only the captured value changes; the rest of that line and every other line
/// is kept verbatim.
pub fn patch_companion(text: &str, from: &str, to: &str) -> Result<String, CompanionError> {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

    let (idx, range, found) = lines
        .iter()
        .enumerate()
        .find_map(|(idx, line)| {
            let caps = METADATA_LINE.captures(line)?;
            let value = caps.get(1)?;
            Some((idx, value.range(), value.as_str().to_string()))
        })
        .ok_or(CompanionError::MissingMetadata)?;

    if found != from {
        return Err(CompanionError::UnexpectedMetadata {
            expected: from.to_string(),
            found,
        });
    }

    lines[idx].replace_range(range, to);
    Ok(lines.join("\n"))
}
