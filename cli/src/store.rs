use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};
use voxmine_core::{KeyValueStore, StoreError};

/// Key-value store kept as a flat JSON object on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the file, a missing or unreadable JSON body starts empty.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                log::warn!("Ignoring corrupt score file {}: {}", path.display(), err);
                BTreeMap::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()));
            }
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.clone();
        entries.insert(key.into(), value);
        self.write(&entries)
            .map_err(|err| StoreError::Rejected(err.to_string()))?;
        self.entries = entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmine_core::{Difficulty, ScoreStore};

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("voxmine-{}-{}.json", name, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn missing_file_starts_empty_and_persists_writes() {
        let path = temp_path("persist");

        let mut scores = ScoreStore::new(JsonFileStore::open(&path).unwrap());
        assert_eq!(scores.best(Difficulty::Easy), None);
        scores.save(31, Difficulty::Easy).unwrap();

        let reopened = ScoreStore::new(JsonFileStore::open(&path).unwrap());
        assert_eq!(reopened.best(Difficulty::Easy), Some(31));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_write_leaves_entries_unchanged() {
        let dir = temp_path("no-such-dir");
        let path = dir.join("scores.json");

        let mut scores = ScoreStore::new(JsonFileStore::open(&path).unwrap());
        assert!(matches!(
            scores.save(12, Difficulty::Medium),
            Err(StoreError::Rejected(_))
        ));
        assert_eq!(scores.best(Difficulty::Medium), None);
        assert_eq!(scores.store().get("best-medium"), None);
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("best-easy"), None);
        fs::remove_file(&path).unwrap();
    }
}
