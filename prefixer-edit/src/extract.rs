use crate::error::ExtractError;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

/// Phrase written into the marker line; its presence right after the header
/// means the file was already rewritten.
pub const MARKER: &str = "prefixed by go-proto-filename-prefixer";

static SOURCE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//\s+source:\s+(.+\.proto)$").expect("source header regex"));

static DESCRIPTOR_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^var\s+(\w+)\s+protoreflect.FileDescriptor$").expect("descriptor var regex")
});

/// Landmark positions and the decoded payload of one generated file.
///
/// Line indices refer to the text split on `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRegions {
    /// Index of the `// source: <path>` line.
    pub header_line: usize,
    /// Path named by the header.
    pub source_name: String,
    /// Name of the `protoreflect.FileDescriptor` variable.
    pub descriptor_var: String,
    /// First data line up to (excluding) the closing `}` line.
    pub block: Range<usize>,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Target(ExtractedRegions),
    /// Neither a source header nor a descriptor variable.
    NotATarget,
    /// The line after the header already carries [`MARKER`].
    AlreadyProcessed,
}

enum BlockState {
    Searching,
    Open { decl: usize, first: Option<usize> },
    Closed { first: usize, end: usize },
}

pub fn extract(text: &str) -> Result<Extraction, ExtractError> {
    let lines: Vec<&str> = text.split('\n').collect();

    let mut header: Option<(usize, String)> = None;
    let mut var: Option<String> = None;
    let mut decl: Option<Regex> = None;
    let mut state = BlockState::Searching;
    let mut payload = Vec::new();

    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim_end_matches('\r');

        if header.is_none()
            && let Some(caps) = SOURCE_HEADER.captures(line)
        {
            if let BlockState::Open { decl, .. } = state {
                return Err(ExtractError::HeaderAfterBlock { header: idx, block: decl });
            }
            if lines.get(idx + 1).is_some_and(|next| next.contains(MARKER)) {
                debug!(line = idx, "marker found after source header");
                return Ok(Extraction::AlreadyProcessed);
            }
            header = Some((idx, caps[1].to_string()));
            continue;
        }

        if var.is_none()
            && let Some(caps) = DESCRIPTOR_VAR.captures(line)
        {
            let name = caps[1].to_string();
            decl = Some(raw_desc_pattern(&name)?);
            var = Some(name);
            continue;
        }

        match state {
            BlockState::Searching => {
                if decl.as_ref().is_some_and(|re| re.is_match(line)) {
                    state = BlockState::Open {
                        decl: idx,
                        first: None,
                    };
                }
            }
            BlockState::Open { decl, first } => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "}" {
                    let Some(first) = first else {
                        return Err(ExtractError::EmptyBlock { line: decl });
                    };
                    state = BlockState::Closed { first, end: idx };
                    break;
                }
                decode_row(trimmed, idx, &mut payload)?;
                state = BlockState::Open {
                    decl,
                    first: Some(first.unwrap_or(idx)),
                };
            }
            BlockState::Closed { .. } => break,
        }
    }

    let (first, end) = match state {
        BlockState::Closed { first, end } => (first, end),
        BlockState::Open { decl, .. } => return Err(ExtractError::Unterminated { line: decl }),
        BlockState::Searching => {
            return match (&header, var) {
                (None, None) => Ok(Extraction::NotATarget),
                (_, None) => Err(ExtractError::MissingDescriptorVar),
                (_, Some(var)) => Err(ExtractError::MissingBlock { var }),
            };
        }
    };

    let Some((header_line, source_name)) = header else {
        return Err(ExtractError::MissingHeader);
    };
    let descriptor_var = var.unwrap_or_default();

    debug!(
        source = %source_name,
        var = %descriptor_var,
        bytes = payload.len(),
        "extracted descriptor block"
    );

    Ok(Extraction::Target(ExtractedRegions {
        header_line,
        source_name,
        descriptor_var,
        block: first..end,
        payload,
    }))
}

/// `var <lowercased var>_rawDesc = []byte{`
fn raw_desc_pattern(var: &str) -> Result<Regex, ExtractError> {
    let ident = regex::escape(&var.to_lowercase());
    Ok(Regex::new(&format!(r"var\s+{ident}_rawDesc\s+=\s+\[\]byte\{{"))?)
}

/// Decode one row of `0x0a, 0x15, ...` tokens.
fn decode_row(row: &str, line: usize, out: &mut Vec<u8>) -> Result<(), ExtractError> {
    for token in row.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let byte = token
            .strip_prefix("0x")
            .filter(|digits| digits.len() == 2)
            .and_then(|digits| hex::decode(digits).ok())
            .ok_or_else(|| ExtractError::InvalidToken {
                line,
                token: token.to_string(),
            })?;
        out.extend_from_slice(&byte);
    }
    Ok(())
}
