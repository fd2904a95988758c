//! Record service
//!
//! Business-rule seam between the HTTP layer and the repository. Currently
//! every call is forwarded unchanged.

use std::sync::Arc;

use crate::domain::{Manga, MangaId, NewManga};
use crate::repository::{MangaRepository, RepositoryResult, StoreStatus};

/// Service over the manga collection
#[derive(Debug, Clone)]
pub struct MangaService {
    repository: Arc<MangaRepository>,
}

impl MangaService {
    pub fn new(repository: Arc<MangaRepository>) -> Self {
        Self { repository }
    }

    pub fn get_all(&self) -> Vec<Manga> {
        self.repository.list()
    }

    pub fn get_by_id(&self, id: MangaId) -> Option<Manga> {
        self.repository.get(id)
    }

    pub fn add(&self, manga: Manga) -> RepositoryResult<Manga> {
        self.repository.add(manga)
    }

    pub fn create(&self, new_manga: NewManga) -> RepositoryResult<Manga> {
        self.repository.create(new_manga)
    }

    pub fn update(&self, manga: Manga) -> RepositoryResult<()> {
        self.repository.update(manga)
    }

    pub fn delete(&self, id: MangaId) -> RepositoryResult<()> {
        self.repository.delete(id)
    }

    pub fn status(&self) -> &StoreStatus {
        self.repository.status()
    }
}
