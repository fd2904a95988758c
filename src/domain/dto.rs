//! # Transfer Objects
//!
//! Outward shape of a record and the creation payload, with the mappings
//! between them and [`Manga`].

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::datetime;
use super::manga::{validate_required, Manga, MangaId, NewManga};

/// Public representation of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaDto {
    pub id: MangaId,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    /// Year component of the publication date
    pub publication_year: i32,
    pub volume_count: i32,
    pub is_on_api: bool,
}

impl From<&Manga> for MangaDto {
    fn from(manga: &Manga) -> Self {
        Self {
            id: manga.id,
            title: manga.title.clone(),
            author: manga.author.clone(),
            genre: manga.genre.clone(),
            publication_year: manga.publication_date.year(),
            volume_count: manga.volume_count,
            is_on_api: manga.is_on_api,
        }
    }
}

impl From<Manga> for MangaDto {
    fn from(manga: Manga) -> Self {
        Self::from(&manga)
    }
}

/// Payload accepted when creating a record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaCreateDto {
    pub title: String,
    pub author: String,

    #[serde(default)]
    pub genre: Option<String>,

    /// Accepted for compatibility; replaced by the creation time on mapping
    #[serde(default, deserialize_with = "datetime::option::deserialize")]
    pub publication_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub volume_count: i32,

    #[serde(default)]
    pub is_on_api: bool,
}

impl MangaCreateDto {
    pub fn validate(&self) -> Result<(), String> {
        validate_required(&self.title, &self.author)
    }

    /// Map to an unnumbered record stamped with `now`
    pub fn into_new_manga(self, now: DateTime<Utc>) -> NewManga {
        NewManga {
            title: self.title,
            author: self.author,
            genre: self.genre,
            publication_date: now,
            volume_count: self.volume_count,
            is_on_api: self.is_on_api,
        }
    }
}
