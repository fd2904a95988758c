//! Repository layer
//!
//! Owns the in-memory collection and keeps the data bank file in sync with it.

mod errors;
mod file;
mod store;

pub use errors::{RepositoryError, RepositoryResult};
pub use store::{MangaRepository, StoreStatus};
