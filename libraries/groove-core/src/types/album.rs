//! Album types

use super::{Artist, ArtistId, Genre, GenreId, Track};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// An album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist_id: ArtistId,
    pub cover_image: Option<String>,
    pub release_date: DateTime<Utc>,
    pub genre_id: GenreId,
    /// Sum of track durations in seconds; `None` until tracks exist
    pub total_duration: Option<i64>,
    /// 1 for freshly uploaded albums, 0 otherwise
    pub is_new: i32,
}

/// Data for creating a new album
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbum {
    pub title: String,
    pub artist_id: ArtistId,
    pub cover_image: Option<String>,
    pub release_date: DateTime<Utc>,
    pub genre_id: GenreId,
    pub total_duration: Option<i64>,
    pub is_new: i32,
}

/// Album joined with its artist and genre, as served by listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumSummary {
    #[serde(flatten)]
    pub album: Album,
    pub artist: Option<Artist>,
    pub genre: Option<Genre>,
}

/// Album detail view: artist, genre, ordered tracks and related albums
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumWithDetails {
    #[serde(flatten)]
    pub album: Album,
    pub artist: Artist,
    pub genre: Genre,
    pub tracks: Vec<Track>,
    pub related_albums: Vec<AlbumSummary>,
}
