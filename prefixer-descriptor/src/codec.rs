use crate::error::CodecError;
use prost::encoding::{WireType, decode_key, decode_varint, encode_key, encode_varint};
use tracing::trace;

/// `FileDescriptorProto.name`
pub const NAME_TAG: u32 = 1;
/// `FileDescriptorProto.dependency` (repeated)
pub const DEPENDENCY_TAG: u32 = 3;

/// Decoded view of a serialized file descriptor.
///
/// Only `name` and `dependencies` are interpreted. Everything else is kept as
/// raw wire bytes in original order, so an unmodified record encodes back to
/// the exact payload it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorRecord {
    pub name: String,
    pub dependencies: Vec<String>,
    layout: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Name,
    Dependency(usize),
    Opaque(Vec<u8>),
}

impl DescriptorRecord {
    /// Build a record with no other fields, name first then dependencies.
    pub fn new(name: impl Into<String>, dependencies: Vec<String>) -> Self {
        let mut layout = vec![Segment::Name];
        layout.extend((0..dependencies.len()).map(Segment::Dependency));
        Self {
            name: name.into(),
            dependencies,
            layout,
        }
    }

    /// Number of uninterpreted top-level fields carried through.
    pub fn opaque_field_count(&self) -> usize {
        self.layout
            .iter()
            .filter(|s| matches!(s, Segment::Opaque(_)))
            .count()
    }
}

pub fn decode(bytes: &[u8]) -> Result<DescriptorRecord, CodecError> {
    let mut cursor = bytes;
    let mut name: Option<String> = None;
    let mut name_raw: Option<(usize, Vec<u8>)> = None;
    let mut dependencies = Vec::new();
    let mut layout = Vec::new();

    while !cursor.is_empty() {
        let start = bytes.len() - cursor.len();
        let (tag, wire_type) = decode_key(&mut cursor)?;

        match (tag, wire_type) {
            (NAME_TAG, WireType::LengthDelimited) => {
                let value = read_string(&mut cursor, "name")?;
                let end = bytes.len() - cursor.len();
                // Last occurrence wins; earlier ones stay in place as opaque bytes.
                if let Some((idx, raw)) = name_raw.take() {
                    layout[idx] = Segment::Opaque(raw);
                }
                name_raw = Some((layout.len(), bytes[start..end].to_vec()));
                layout.push(Segment::Name);
                name = Some(value);
            }
            (DEPENDENCY_TAG, WireType::LengthDelimited) => {
                let value = read_string(&mut cursor, "dependency")?;
                layout.push(Segment::Dependency(dependencies.len()));
                dependencies.push(value);
            }
            _ => {
                skip_field(wire_type, tag, &mut cursor)?;
                let end = bytes.len() - cursor.len();
                layout.push(Segment::Opaque(bytes[start..end].to_vec()));
            }
        }
    }

    let name = name.filter(|n| !n.is_empty()).ok_or(CodecError::MissingName)?;
    trace!(name = %name, deps = dependencies.len(), fields = layout.len(), "decoded descriptor");

    Ok(DescriptorRecord {
        name,
        dependencies,
        layout,
    })
}

/// Encode a record back to wire bytes.
///
/// Dependencies appended beyond the decoded count are emitted right after the
/// last original dependency (or at the end when there was none).
pub fn encode(record: &DescriptorRecord) -> Result<Vec<u8>, CodecError> {
    if record.name.is_empty() {
        return Err(CodecError::MissingName);
    }

    let decoded_deps = record
        .layout
        .iter()
        .filter(|s| matches!(s, Segment::Dependency(_)))
        .count();
    let last_dep = record
        .layout
        .iter()
        .rposition(|s| matches!(s, Segment::Dependency(_)));

    let mut out = Vec::new();
    for (i, segment) in record.layout.iter().enumerate() {
        match segment {
            Segment::Name => put_string(NAME_TAG, &record.name, &mut out),
            Segment::Dependency(idx) => {
                if let Some(dep) = record.dependencies.get(*idx) {
                    put_string(DEPENDENCY_TAG, dep, &mut out);
                }
            }
            Segment::Opaque(raw) => out.extend_from_slice(raw),
        }
        if last_dep == Some(i) {
            for dep in record.dependencies.iter().skip(decoded_deps) {
                put_string(DEPENDENCY_TAG, dep, &mut out);
            }
        }
    }
    if last_dep.is_none() {
        for dep in &record.dependencies {
            put_string(DEPENDENCY_TAG, dep, &mut out);
        }
    }

    Ok(out)
}

fn put_string(tag: u32, value: &str, out: &mut Vec<u8>) {
    encode_key(tag, WireType::LengthDelimited, out);
    encode_varint(value.len() as u64, out);
    out.extend_from_slice(value.as_bytes());
}

fn read_string(cursor: &mut &[u8], field: &'static str) -> Result<String, CodecError> {
    let len = decode_varint(cursor)?;
    let raw = take(cursor, len)?;
    String::from_utf8(raw.to_vec()).map_err(|_| CodecError::InvalidUtf8 { field })
}

fn take<'a>(cursor: &mut &'a [u8], len: u64) -> Result<&'a [u8], CodecError> {
    let remaining = cursor.len();
    let n = usize::try_from(len)
        .ok()
        .filter(|n| *n <= remaining)
        .ok_or(CodecError::Truncated {
            needed: len,
            remaining,
        })?;
    let (head, tail) = cursor.split_at(n);
    *cursor = tail;
    Ok(head)
}

fn skip_field(wire_type: WireType, tag: u32, cursor: &mut &[u8]) -> Result<(), CodecError> {
    match wire_type {
        WireType::Varint => {
            decode_varint(cursor)?;
        }
        WireType::SixtyFourBit => {
            take(cursor, 8)?;
        }
        WireType::ThirtyTwoBit => {
            take(cursor, 4)?;
        }
        WireType::LengthDelimited => {
            let len = decode_varint(cursor)?;
            take(cursor, len)?;
        }
        WireType::StartGroup => loop {
            if cursor.is_empty() {
                return Err(CodecError::UnbalancedGroup { tag });
            }
            let (inner_tag, inner_type) = decode_key(cursor)?;
            if inner_type == WireType::EndGroup {
                if inner_tag != tag {
                    return Err(CodecError::UnbalancedGroup { tag: inner_tag });
                }
                break;
            }
            skip_field(inner_type, inner_tag, cursor)?;
        },
        WireType::EndGroup => return Err(CodecError::UnbalancedGroup { tag }),
    }
    Ok(())
}
