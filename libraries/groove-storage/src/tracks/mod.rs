use groove_core::{
    error::{GrooveError, Result},
    types::{AlbumId, CreateTrack, Track, TrackId},
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Track {
    Track {
        id: row.get("id"),
        title: row.get("title"),
        album_id: row.get("album_id"),
        track_number: row.get("track_number"),
        duration: row.get("duration"),
        audio_file: row.get("audio_file"),
    }
}

pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(
        "SELECT id, title, album_id, track_number, duration, audio_file FROM tracks WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Tracks in playing order
pub async fn get_by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, album_id, track_number, duration, audio_file
        FROM tracks
        WHERE album_id = ?
        ORDER BY track_number ASC, id ASC
        "#,
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Create track
///
/// Does not touch the album's total duration; callers refresh it afterwards.
pub async fn create(pool: &SqlitePool, track: CreateTrack) -> Result<Track> {
    let result = sqlx::query(
        r#"
        INSERT INTO tracks (title, album_id, track_number, duration, audio_file)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&track.title)
    .bind(track.album_id)
    .bind(track.track_number)
    .bind(track.duration)
    .bind(&track.audio_file)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| GrooveError::not_found("track", id))
}
