//! Recursive discovery of generated descriptor files.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Every regular file under `root` ending in `file_suffix`, minus companion
/// files, sorted.
///
/// Unreadable entries and non-UTF-8 paths are logged and skipped.
pub fn scan_candidates(
    root: &Utf8Path,
    file_suffix: &str,
    companion_suffix: &str,
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root);
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            warn!(path = %entry.path().display(), "skipping non-UTF-8 path");
            continue;
        };

        let name = path.file_name().unwrap_or_default();
        if !name.ends_with(file_suffix) || name.ends_with(companion_suffix) {
            continue;
        }
        out.push(path.to_path_buf());
    }

    out.sort();
    debug!(root = %root, count = out.len(), "scanned candidates");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn touch(root: &Utf8Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent).expect("mkdir");
        }
        fs_err::write(path, "package x\n").expect("write");
    }

    #[test]
    fn finds_generated_files_and_skips_companions() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8Path::from_path(temp.path()).expect("utf8");
        touch(root, "b/foo.pb.go");
        touch(root, "b/foo_grpc.pb.go");
        touch(root, "a/bar.pb.go");
        touch(root, "a/bar.go");
        touch(root, "README.md");

        let found = scan_candidates(root, ".pb.go", "_grpc.pb.go").expect("scan");
        let rel: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(root).expect("under root").to_string())
            .collect();
        assert_eq!(rel, vec!["a/bar.pb.go", "b/foo.pb.go"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = scan_candidates(Utf8Path::new("/definitely/not/here"), ".pb.go", "_grpc.pb.go")
            .unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
