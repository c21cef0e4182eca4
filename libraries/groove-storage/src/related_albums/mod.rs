//! Directed "see also" edges between albums

use crate::albums;
use groove_core::{
    error::Result,
    types::{Album, AlbumId},
};
use sqlx::{Row, SqlitePool};

/// Target ids of edges leaving `album_id`, ascending
pub async fn get_targets(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<AlbumId>> {
    let rows = sqlx::query(
        "SELECT related_album_id FROM related_albums WHERE album_id = ? ORDER BY related_album_id",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| row.get("related_album_id")).collect())
}

/// Albums on the far side of edges leaving `album_id`
pub async fn get_related(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Album>> {
    let mut related = Vec::new();
    for id in get_targets(pool, album_id).await? {
        if let Some(album) = albums::get_by_id(pool, id).await? {
            related.push(album);
        }
    }
    Ok(related)
}

/// Add an edge; an existing edge is left untouched
pub async fn add(pool: &SqlitePool, album_id: AlbumId, related_album_id: AlbumId) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO related_albums (album_id, related_album_id) VALUES (?, ?)")
        .bind(album_id)
        .bind(related_album_id)
        .execute(pool)
        .await?;

    Ok(())
}
