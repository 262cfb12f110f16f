use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

/// Original descriptor name -> prefixed name, for every file committed in
/// this run.
///
/// Only grows. An original name is renamed at most once; a second insert is
/// refused and reports the file that claimed it first.
#[derive(Debug, Clone, Default)]
pub struct RenameTable {
    entries: BTreeMap<String, Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    renamed: String,
    source: Utf8PathBuf,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(|e| e.renamed.as_str())
    }

    /// File whose commit recorded `original`.
    pub fn source_of(&self, original: &str) -> Option<&Utf8Path> {
        self.entries.get(original).map(|e| e.source.as_path())
    }

    pub fn contains(&self, original: &str) -> bool {
        self.entries.contains_key(original)
    }

    /// Record a rename. Returns the first claimant's path if `original` is
    /// already present; the existing entry is left untouched.
    pub fn insert(
        &mut self,
        original: impl Into<String>,
        renamed: impl Into<String>,
        source: impl Into<Utf8PathBuf>,
    ) -> Result<(), Utf8PathBuf> {
        let original = original.into();
        if let Some(existing) = self.entries.get(&original) {
            return Err(existing.source.clone());
        }
        self.entries.insert(
            original,
            Entry {
                renamed: renamed.into(),
                source: source.into(),
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, e)| (k.as_str(), e.renamed.as_str()))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_lookup() {
        let mut table = RenameTable::new();
        table
            .insert("api/a.proto", "p/api/a.proto", "gen/a.pb.go")
            .expect("insert");
        assert_eq!(table.get("api/a.proto"), Some("p/api/a.proto"));
        assert_eq!(table.source_of("api/a.proto"), Some(Utf8Path::new("gen/a.pb.go")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn existing_key_is_never_overwritten() {
        let mut table = RenameTable::new();
        table
            .insert("api/a.proto", "p/api/a.proto", "gen/a.pb.go")
            .expect("insert");
        let first = table
            .insert("api/a.proto", "q/api/a.proto", "other/a.pb.go")
            .unwrap_err();

        assert_eq!(first, Utf8PathBuf::from("gen/a.pb.go"));
        assert_eq!(table.get("api/a.proto"), Some("p/api/a.proto"));
    }

    #[test]
    fn map_is_sorted_by_original() {
        let mut table = RenameTable::new();
        table.insert("b.proto", "p/b.proto", "b.pb.go").expect("insert");
        table.insert("a.proto", "p/a.proto", "a.pb.go").expect("insert");
        let keys: Vec<String> = table.to_map().into_keys().collect();
        assert_eq!(keys, vec!["a.proto", "b.proto"]);
    }
}
