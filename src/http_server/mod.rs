//! # mangalib HTTP Server Module
//!
//! axum server exposing the manga collection.
//!
//! # Endpoints
//!
//! - `/health` - Health check and store status
//! - `/records`, `/records/:id` - CRUD over the collection
//! - `/api/v1/manga`, `/api/v1/manga/:id` - same, under the legacy route

pub mod config;
pub mod errors;
pub mod manga_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
