//! Inbound upload forms and their validation rules
//!
//! Forms arrive as multipart text fields. Each form collects every failing
//! field instead of stopping at the first one, so clients can highlight them
//! all at once.

use super::{AlbumId, ArtistId, GenreId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

type Fields = HashMap<String, String>;

/// Artist registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterArtistForm {
    pub name: String,
}

impl RegisterArtistForm {
    pub fn from_fields(fields: &Fields) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let name = required_text(fields, "name", "Artist name is required", &mut errors);

        if errors.is_empty() {
            Ok(Self { name })
        } else {
            Err(errors)
        }
    }
}

/// Album upload form; `password` re-verifies the uploader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAlbumForm {
    pub title: String,
    pub artist_id: ArtistId,
    pub genre_id: GenreId,
    pub release_date: DateTime<Utc>,
    pub password: String,
}

impl UploadAlbumForm {
    pub fn from_fields(fields: &Fields) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = required_text(fields, "title", "Album title is required", &mut errors);
        let artist_id = positive_number(fields, "artistId", "Artist is required", &mut errors);
        let genre_id = positive_number(fields, "genreId", "Genre is required", &mut errors);
        let release_date = match fields.get("releaseDate").map(|s| s.trim()) {
            Some(raw) => parse_release_date(raw).unwrap_or_else(|| {
                errors.push(FieldError::new("releaseDate", "Invalid date"));
                DateTime::<Utc>::MIN_UTC
            }),
            None => {
                errors.push(FieldError::new("releaseDate", "Release date is required"));
                DateTime::<Utc>::MIN_UTC
            }
        };
        let password = required_text(
            fields,
            "password",
            "Password is required for verification",
            &mut errors,
        );

        if errors.is_empty() {
            Ok(Self {
                title,
                artist_id,
                genre_id,
                release_date,
                password,
            })
        } else {
            Err(errors)
        }
    }
}

/// Track upload form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTrackForm {
    pub title: String,
    pub album_id: AlbumId,
    pub track_number: i32,
}

impl UploadTrackForm {
    pub fn from_fields(fields: &Fields) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = required_text(fields, "title", "Track title is required", &mut errors);
        let album_id = positive_number(fields, "albumId", "Album is required", &mut errors);
        let track_number =
            positive_number(fields, "trackNumber", "Track number is required", &mut errors);
        let track_number = i32::try_from(track_number).unwrap_or_else(|_| {
            errors.push(FieldError::new("trackNumber", "Track number is too large"));
            0
        });

        if errors.is_empty() {
            Ok(Self {
                title,
                album_id,
                track_number,
            })
        } else {
            Err(errors)
        }
    }
}

fn required_text(fields: &Fields, field: &str, message: &str, errors: &mut Vec<FieldError>) -> String {
    match fields.get(field) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => {
            errors.push(FieldError::new(field, message));
            String::new()
        }
    }
}

/// Blank counts as zero, matching how browsers submit empty selects.
fn positive_number(fields: &Fields, field: &str, message: &str, errors: &mut Vec<FieldError>) -> i64 {
    let raw = fields.get(field).map(|s| s.trim()).unwrap_or("");
    let value = if raw.is_empty() {
        Some(0)
    } else {
        raw.parse::<i64>().ok()
    };

    match value {
        Some(n) if n >= 1 => n,
        Some(_) => {
            errors.push(FieldError::new(field, message));
            0
        }
        None => {
            errors.push(FieldError::new(field, "Expected a number"));
            0
        }
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM` (HTML datetime-local) and `YYYY-MM-DD`.
fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
