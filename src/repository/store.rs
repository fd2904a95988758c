//! # Manga Repository
//!
//! Authoritative in-memory list of records mirrored to the data bank file.
//!
//! Every mutation holds the write lock from the in-memory change through the
//! file rewrite. If the rewrite fails the in-memory change is undone, so a
//! mutation that returns `Ok` is always already on disk and one that returns
//! `Err` left both copies untouched.
//!
//! An unbacked store (no data bank configured) keeps appended records in
//! memory only. Update and delete need a backing file and report
//! `StorageUnavailable` without one.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use super::errors::{RepositoryError, RepositoryResult};
use super::file::{DataBankFile, LoadOutcome};
use crate::domain::{Manga, MangaId, NewManga};
use crate::observability::Logger;

/// Condition of the store as determined at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StoreStatus {
    /// Data bank read successfully
    Loaded { records: usize },
    /// Data bank path configured but no file yet; created on first write
    Fresh,
    /// No data bank configured; appends stay in memory
    Unbacked,
    /// Data bank could not be parsed; started empty. The next successful
    /// write replaces the unreadable file.
    Degraded { reason: String },
}

impl StoreStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, StoreStatus::Degraded { .. })
    }
}

/// Repository over the manga collection
#[derive(Debug)]
pub struct MangaRepository {
    mangas: RwLock<Vec<Manga>>,
    file: Option<DataBankFile>,
    status: StoreStatus,
}

impl MangaRepository {
    /// Open the repository.
    ///
    /// `data_bank` is resolved against `base_dir` unless it is absolute. An
    /// empty `data_bank` produces an unbacked store. A malformed file is
    /// logged and yields an empty store with [`StoreStatus::Degraded`].
    ///
    /// # Errors
    ///
    /// Only I/O failures other than "file not found" (permissions, the path
    /// being a directory) are returned.
    pub fn open(data_bank: &str, base_dir: &Path) -> RepositoryResult<Self> {
        let data_bank = data_bank.trim();
        if data_bank.is_empty() {
            Logger::warn("STORE_UNBACKED", &[("reason", "no data bank configured")]);
            return Ok(Self::unbacked());
        }

        let file = DataBankFile::new(base_dir.join(data_bank));
        let path = file.path().display().to_string();

        let (mangas, status) = match file.load()? {
            LoadOutcome::Parsed(mangas) => {
                let records = mangas.len();
                let count = records.to_string();
                Logger::info(
                    "STORE_LOADED",
                    &[("path", path.as_str()), ("records", count.as_str())],
                );
                (mangas, StoreStatus::Loaded { records })
            }
            LoadOutcome::Missing => {
                Logger::info("STORE_LOADED", &[("path", path.as_str()), ("records", "0")]);
                (Vec::new(), StoreStatus::Fresh)
            }
            LoadOutcome::Malformed(reason) => {
                Logger::warn(
                    "STORE_LOAD_FAILED",
                    &[("path", path.as_str()), ("reason", reason.as_str())],
                );
                (Vec::new(), StoreStatus::Degraded { reason })
            }
        };

        Ok(Self {
            mangas: RwLock::new(mangas),
            file: Some(file),
            status,
        })
    }

    /// A store with no backing file. Appends are kept in memory only.
    pub fn unbacked() -> Self {
        Self {
            mangas: RwLock::new(Vec::new()),
            file: None,
            status: StoreStatus::Unbacked,
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    /// Resolved data bank path, if any
    pub fn path(&self) -> Option<PathBuf> {
        self.file.as_ref().map(|f| f.path().to_path_buf())
    }

    /// All records in storage order
    pub fn list(&self) -> Vec<Manga> {
        self.read().clone()
    }

    /// First record with the given id
    pub fn get(&self, id: MangaId) -> Option<Manga> {
        self.read().iter().find(|m| m.id == id).cloned()
    }

    /// Identifier the next created record would receive
    pub fn next_id(&self) -> RepositoryResult<MangaId> {
        next_id_of(&self.read())
    }

    /// Append a record with a caller-chosen id.
    ///
    /// Duplicate ids are not rejected; use [`create`](Self::create) to have
    /// one assigned.
    pub fn add(&self, manga: Manga) -> RepositoryResult<Manga> {
        let mut mangas = self.write();
        self.append(&mut mangas, manga)
    }

    /// Assign the next id and append, as one step
    pub fn create(&self, new_manga: NewManga) -> RepositoryResult<Manga> {
        let mut mangas = self.write();
        let manga = new_manga.with_id(next_id_of(&mangas)?);
        self.append(&mut mangas, manga)
    }

    /// Replace the first record with the same id
    pub fn update(&self, manga: Manga) -> RepositoryResult<()> {
        let file = self.backing_file()?;
        let mut mangas = self.write();

        let index = mangas
            .iter()
            .position(|m| m.id == manga.id)
            .ok_or(RepositoryError::NotFound(manga.id))?;

        let previous = std::mem::replace(&mut mangas[index], manga);
        if let Err(e) = persist(file, &mangas) {
            mangas[index] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Remove every record with the given id
    pub fn delete(&self, id: MangaId) -> RepositoryResult<()> {
        let file = self.backing_file()?;
        let mut mangas = self.write();

        if !mangas.iter().any(|m| m.id == id) {
            return Err(RepositoryError::NotFound(id));
        }

        let previous = mangas.clone();
        mangas.retain(|m| m.id != id);
        if let Err(e) = persist(file, &mangas) {
            *mangas = previous;
            return Err(e);
        }
        Ok(())
    }

    fn append(&self, mangas: &mut Vec<Manga>, manga: Manga) -> RepositoryResult<Manga> {
        mangas.push(manga.clone());
        if let Some(file) = &self.file {
            if let Err(e) = persist(file, mangas) {
                mangas.pop();
                return Err(e);
            }
        }
        Ok(manga)
    }

    /// Backing file for update and delete, which require it to exist already
    fn backing_file(&self) -> RepositoryResult<&DataBankFile> {
        let file = self.file.as_ref().ok_or_else(|| {
            RepositoryError::StorageUnavailable("no data bank configured".to_string())
        })?;

        if !file.exists() {
            return Err(RepositoryError::StorageUnavailable(format!(
                "data bank file missing: {}",
                file.path().display()
            )));
        }
        Ok(file)
    }

    // A panic while holding the lock can only happen between two complete
    // states, so a poisoned lock still guards a consistent list.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Manga>> {
        self.mangas.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Manga>> {
        self.mangas.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn next_id_of(mangas: &[Manga]) -> RepositoryResult<MangaId> {
    let max = mangas.iter().map(|m| m.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(RepositoryError::IdsExhausted(max))
}

fn persist(file: &DataBankFile, mangas: &[Manga]) -> RepositoryResult<()> {
    file.write_all(mangas).map_err(|e| {
        let path = file.path().display().to_string();
        let reason = e.to_string();
        Logger::error(
            "STORE_WRITE_FAILED",
            &[("path", path.as_str()), ("reason", reason.as_str())],
        );
        e
    })
}
