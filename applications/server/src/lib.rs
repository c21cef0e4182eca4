//! Groove Server Library
//!
//! HTTP front end of the music catalog: public browsing endpoints, uploads
//! for albums, tracks and artist profiles, and admin deletion.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::{ServerConfig, StorageBackend};
pub use error::{Result, ServerError};
pub use services::{auth::AuthService, uploads::UploadStore};
pub use state::AppState;
