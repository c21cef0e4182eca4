use crate::albums;
use groove_core::{
    error::{GrooveError, Result},
    types::{Artist, ArtistId, CreateArtist, UserId},
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Artist {
    Artist {
        id: row.get("id"),
        name: row.get("name"),
        image: row.get("image"),
        user_id: row.get("user_id"),
    }
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query("SELECT id, name, image, user_id FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(from_row).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query("SELECT id, name, image, user_id FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

pub async fn get_by_user(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Artist>> {
    let rows =
        sqlx::query("SELECT id, name, image, user_id FROM artists WHERE user_id = ? ORDER BY id")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(rows.iter().map(from_row).collect())
}

pub async fn create(pool: &SqlitePool, artist: CreateArtist) -> Result<Artist> {
    let result = sqlx::query("INSERT INTO artists (name, image, user_id) VALUES (?, ?, ?)")
        .bind(&artist.name)
        .bind(&artist.image)
        .bind(artist.user_id)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| GrooveError::not_found("artist", id))
}

/// Delete artist and every album it owns
pub async fn delete(pool: &SqlitePool, id: ArtistId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let album_ids = albums::get_ids_by_artist(&mut tx, id).await?;
    for album_id in &album_ids {
        albums::delete_cascade(&mut tx, *album_id).await?;
    }

    sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(artist_id = id, albums = album_ids.len(), "Deleted artist");
    Ok(())
}
