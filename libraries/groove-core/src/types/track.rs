//! Track types

use super::AlbumId;
use serde::{Deserialize, Serialize};

pub type TrackId = i64;

/// A track belonging to exactly one album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub album_id: AlbumId,
    /// Ordering key within the album, not unique
    pub track_number: i32,
    /// Duration in seconds
    pub duration: i64,
    /// Public path of the uploaded audio file
    pub audio_file: Option<String>,
}

/// Data for creating a new track
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrack {
    pub title: String,
    pub album_id: AlbumId,
    pub track_number: i32,
    pub duration: i64,
    pub audio_file: Option<String>,
}
