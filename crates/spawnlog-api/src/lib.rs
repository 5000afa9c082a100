//! Spawnlog HTTP API.
//!
//! Hosts the ingest endpoint that records spawn sightings plus the health
//! probes used by orchestration systems.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod server;

use spawnlog_core::Storage;

pub use config::Config;
pub use server::{create_router, start_server};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Storage layer backing all database access.
    pub storage: Storage,
}

impl AppState {
    /// Creates application state from the storage layer.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}
