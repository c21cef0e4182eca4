//! Groove Catalog Core
//!
//! Backend-agnostic domain types, form validation, and the storage contract
//! for the Groove music catalog.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Artist`, `Genre`, `Album`, `Track`
//! - **Listing Contract**: `AlbumFilter` / `AlbumQuery` with the shared filter and sort rules
//! - **Storage Trait**: `CatalogStorage`, implemented by every backend
//! - **Error Handling**: Unified `GrooveError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use groove_core::types::{AlbumFilter, Timeframe};
//! use chrono::Utc;
//!
//! let filter = AlbumFilter {
//!     genre_id: Some(1),
//!     search: Some("Neon".to_string()),
//!     timeframe: Some(Timeframe::Year),
//! };
//! let window_start = Timeframe::Year.window_start(Utc::now());
//! assert!(window_start < Utc::now());
//! # let _ = filter;
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{GrooveError, Result};
pub use storage::CatalogStorage;

pub use types::{
    Album, AlbumFilter, AlbumId, AlbumQuery, AlbumSummary, AlbumWithDetails, Artist, ArtistId,
    CreateAlbum, CreateArtist, CreateGenre, CreateTrack, CreateUser, FieldError, Genre, GenreId,
    RegisterArtistForm, Role, SortBy, SortOrder, Timeframe, Track, TrackId, UploadAlbumForm,
    UploadTrackForm, User, UserId,
};
