//! HTTP request handlers for the spawnlog API.
//!
//! Handlers follow a consistent pattern:
//! - Explicit parse-and-validate of untyped query parameters
//! - Tracing for observability
//! - Per-request connection scoping with guaranteed release
//! - Standardized error responses with codes from the taxonomy
//!
//! # Handler Organization
//!
//! - `ingest` - Spawn sighting ingestion
//! - `health` - Health check and readiness probes

pub mod health;
pub mod ingest;

pub use health::{health_check, liveness_check, readiness_check};
pub use ingest::ingest_spawn;
