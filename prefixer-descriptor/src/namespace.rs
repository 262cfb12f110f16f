/// Namespace group of a descriptor name: its first directory segment.
///
/// `api/foo.proto` -> `api`, `api/v1/foo.proto` -> `api`, `foo.proto` -> `.`.
/// Empty and `.` segments are ignored the way a cleaned path would drop them.
pub fn namespace_group(name: &str) -> &str {
    let Some(idx) = name.rfind('/') else {
        return ".";
    };
    name[..idx]
        .split('/')
        .find(|seg| !seg.is_empty() && *seg != ".")
        .unwrap_or(".")
}

/// True when both names live in the same namespace group.
pub fn co_located(a: &str, b: &str) -> bool {
    namespace_group(a) == namespace_group(b)
}
