//! # Data Bank File
//!
//! Reading and atomically replacing the JSON file that backs the store.
//! A rewrite goes to `<name>.tmp` next to the target, is fsynced, then
//! renamed over the target, so a crash leaves either the old or the new
//! list on disk and never a truncated one.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::RepositoryResult;
use crate::domain::Manga;

/// Outcome of reading the data bank at startup
#[derive(Debug)]
pub enum LoadOutcome {
    /// File parsed (possibly an empty or whitespace-only file)
    Parsed(Vec<Manga>),
    /// File does not exist yet
    Missing,
    /// File exists but is not a JSON array of records
    Malformed(String),
}

/// Handle to the data bank file
#[derive(Debug, Clone)]
pub struct DataBankFile {
    path: PathBuf,
}

impl DataBankFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and parse the file.
    ///
    /// I/O failures other than "not found" are returned as errors; parse
    /// failures are reported as [`LoadOutcome::Malformed`].
    pub fn load(&self) -> RepositoryResult<LoadOutcome> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LoadOutcome::Missing)
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(LoadOutcome::Parsed(Vec::new()));
        }

        match serde_json::from_str::<Option<Vec<Manga>>>(&content) {
            Ok(mangas) => Ok(LoadOutcome::Parsed(mangas.unwrap_or_default())),
            Err(e) => Ok(LoadOutcome::Malformed(e.to_string())),
        }
    }

    /// Replace the file with the serialized list
    pub fn write_all(&self, mangas: &[Manga]) -> RepositoryResult<()> {
        let json = serde_json::to_string_pretty(mangas)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.tmp_path();
        let result = (|| -> RepositoryResult<()> {
            let mut file = File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &self.path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn manga(id: i64) -> Manga {
        Manga {
            id,
            title: format!("Title {}", id),
            author: "Author".to_string(),
            genre: None,
            publication_date: Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap(),
            volume_count: 1,
            is_on_api: false,
        }
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let file = DataBankFile::new(temp.path().join("mangas.json"));

        assert!(!file.exists());
        assert!(matches!(file.load().unwrap(), LoadOutcome::Missing));
    }

    #[test]
    fn test_whitespace_and_null_files_are_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mangas.json");
        let file = DataBankFile::new(path.clone());

        fs::write(&path, "  \n\t").unwrap();
        assert!(matches!(file.load().unwrap(), LoadOutcome::Parsed(v) if v.is_empty()));

        fs::write(&path, "null").unwrap();
        assert!(matches!(file.load().unwrap(), LoadOutcome::Parsed(v) if v.is_empty()));
    }

    #[test]
    fn test_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mangas.json");
        fs::write(&path, "{not json").unwrap();

        let file = DataBankFile::new(path);
        assert!(matches!(file.load().unwrap(), LoadOutcome::Malformed(_)));
    }

    #[test]
    fn test_write_creates_parents_and_leaves_no_tmp() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data/nested/mangas.json");
        let file = DataBankFile::new(path.clone());

        file.write_all(&[manga(1), manga(2)]).unwrap();

        assert!(path.is_file());
        assert!(!temp.path().join("data/nested/mangas.json.tmp").exists());
        match file.load().unwrap() {
            LoadOutcome::Parsed(v) => assert_eq!(v, vec![manga(1), manga(2)]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let temp = TempDir::new().unwrap();
        let file = DataBankFile::new(temp.path().join("mangas.json"));

        file.write_all(&[manga(1), manga(2), manga(3)]).unwrap();
        file.write_all(&[manga(2)]).unwrap();

        match file.load().unwrap() {
            LoadOutcome::Parsed(v) => assert_eq!(v, vec![manga(2)]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
