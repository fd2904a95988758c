//! mangalib - A small manga collection API backed by a flat JSON file
//!
//! Layers, leaf first: `repository` (in-memory list mirrored to the data
//! bank), `service`, `http_server`. `cli` wires them together.

pub mod cli;
pub mod domain;
pub mod http_server;
pub mod observability;
pub mod repository;
pub mod service;
