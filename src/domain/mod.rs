//! Domain types: the manga record and its transfer objects

pub mod datetime;
pub mod dto;
pub mod manga;

pub use dto::{MangaCreateDto, MangaDto};
pub use manga::{Manga, MangaId, NewManga};
