//! Observability for mangalib
//!
//! Structured JSON line logging. Every store lifecycle change and every
//! successful mutation is logged as one event.
//!
//! ```ignore
//! use mangalib::observability::Logger;
//!
//! Logger::info("RECORD_CREATED", &[("id", "7")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
