//! # Manga Record
//!
//! The persisted entity. The same JSON shape is used on disk and as the
//! `PUT` body, so a file written by the server can be fed back verbatim.
//! PascalCase keys are accepted as aliases so data banks written by the
//! previous .NET service still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::datetime;

/// Record identifier
pub type MangaId = i64;

/// A manga in the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manga {
    #[serde(alias = "Id")]
    pub id: MangaId,

    #[serde(alias = "Title")]
    pub title: String,

    #[serde(alias = "Author")]
    pub author: String,

    #[serde(default, alias = "Genre")]
    pub genre: Option<String>,

    #[serde(with = "datetime", alias = "PublicationDate")]
    pub publication_date: DateTime<Utc>,

    #[serde(default, alias = "VolumeCount")]
    pub volume_count: i32,

    /// Whether the record was imported from an external API
    #[serde(default, alias = "IsOnApi")]
    pub is_on_api: bool,
}

/// A record that has not been given an identifier yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewManga {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub publication_date: DateTime<Utc>,
    pub volume_count: i32,
    pub is_on_api: bool,
}

impl NewManga {
    /// Attach an identifier, producing a storable record
    pub fn with_id(self, id: MangaId) -> Manga {
        Manga {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            publication_date: self.publication_date,
            volume_count: self.volume_count,
            is_on_api: self.is_on_api,
        }
    }
}

impl Manga {
    /// Check the required fields.
    ///
    /// Title and author must be present and non-blank. Nothing else is
    /// constrained.
    pub fn validate(&self) -> Result<(), String> {
        validate_required(&self.title, &self.author)
    }
}

pub(crate) fn validate_required(title: &str, author: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("The Title field is required.".to_string());
    }
    if author.trim().is_empty() {
        return Err("The Author field is required.".to_string());
    }
    Ok(())
}
