use crate::extract::{ExtractedRegions, MARKER};

/// Row width of the raw descriptor block, as protoc-gen-go emits it.
pub const BYTES_PER_ROW: usize = 16;

const ROW_INDENT: &str = "\t";

/// The comment inserted right after the source header.
pub fn marker_line(prefix: &str, new_name: &str) -> String {
    format!("// {MARKER} to: {new_name} (prefix: {prefix})")
}

/// Format a payload as `\t0x0a, 0x15, ...,` rows of [`BYTES_PER_ROW`] bytes.
///
/// Every row, including the last, ends with a comma so the Go composite
/// literal stays valid.
pub fn format_rows(payload: &[u8]) -> Vec<String> {
    payload
        .chunks(BYTES_PER_ROW)
        .map(|chunk| {
            let row = chunk
                .iter()
                .map(|b| format!("0x{b:02x},"))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{ROW_INDENT}{row}")
        })
        .collect()
}

/// Produce the new file text.
///
/// Lines up to and including the header are kept, the marker line is
/// inserted, the block body is replaced by `payload`, and every other line is
/// carried over verbatim. The result ends with a newline only if `text` did.
/// Inserted lines follow the header's line ending, so CRLF files stay CRLF.
pub fn splice(
    text: &str,
    regions: &ExtractedRegions,
    payload: &[u8],
    prefix: &str,
    new_name: &str,
) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let header = regions.header_line;
    let block = &regions.block;
    let cr = if lines[header].ends_with('\r') { "\r" } else { "" };

    let marker = format!("{}{cr}", marker_line(prefix, new_name));
    let rows: Vec<String> = format_rows(payload)
        .into_iter()
        .map(|row| format!("{row}{cr}"))
        .collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + rows.len() + 1);

    out.extend_from_slice(&lines[..=header]);
    out.push(&marker);
    out.extend_from_slice(&lines[header + 1..block.start]);
    out.extend(rows.iter().map(String::as_str));
    out.extend_from_slice(&lines[block.end..]);

    out.join("\n")
}
