//! Core domain model and storage layer for the spawn sighting service.
//!
//! Provides the `Spawn` entity, the ingest error taxonomy, and the
//! repository-pattern database access used by the HTTP layer. All other
//! crates depend on these foundational types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod models;
pub mod storage;

pub use error::{CoreError, IngestError, Result};
pub use models::{RawSpawnReport, Spawn};
pub use storage::Storage;
