//! Album queries: filtered listing, counting and cascading delete

use chrono::{DateTime, SubsecRound, Utc};
use groove_core::{
    error::{GrooveError, Result},
    types::{Album, AlbumFilter, AlbumId, AlbumQuery, ArtistId, CreateAlbum, SortBy},
};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};

const ALBUM_COLUMNS: &str = "a.id, a.title, a.artist_id, a.cover_image, a.release_date, \
                             a.genre_id, a.total_duration, a.is_new";

fn from_row(row: &SqliteRow) -> Result<Album> {
    let release_date: i64 = row.get("release_date");
    Ok(Album {
        id: row.get("id"),
        title: row.get("title"),
        artist_id: row.get("artist_id"),
        cover_image: row.get("cover_image"),
        release_date: DateTime::from_timestamp(release_date, 0).ok_or_else(|| {
            GrooveError::storage(format!("release date out of range: {release_date}"))
        })?,
        genre_id: row.get("genre_id"),
        total_duration: row.get("total_duration"),
        is_new: row.get("is_new"),
    })
}

/// Append `WHERE` conditions for the filter
///
/// Timeframe bounds are evaluated against `now`, truncated to whole seconds
/// to match the stored precision.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &AlbumFilter, now: DateTime<Utc>) {
    builder.push(" WHERE 1 = 1");

    if let Some(genre_id) = filter.genre_id {
        builder.push(" AND a.genre_id = ").push_bind(genre_id);
    }

    if let Some(needle) = filter.search_needle() {
        builder
            .push(" AND (instr(lower(a.title), ")
            .push_bind(needle.clone())
            .push(") > 0 OR instr(lower(COALESCE(ar.name, '')), ")
            .push_bind(needle)
            .push(") > 0)");
    }

    if let Some(timeframe) = filter.timeframe {
        let now = now.trunc_subsecs(0);
        builder
            .push(" AND a.release_date >= ")
            .push_bind(timeframe.window_start(now).timestamp())
            .push(" AND a.release_date <= ")
            .push_bind(now.timestamp());
    }
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(&format!("SELECT {ALBUM_COLUMNS} FROM albums a WHERE a.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Filter, sort, then paginate
///
/// Ties in the sort key fall back to ascending album id.
pub async fn get_filtered(pool: &SqlitePool, query: &AlbumQuery) -> Result<Vec<Album>> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {ALBUM_COLUMNS} FROM albums a LEFT JOIN artists ar ON ar.id = a.artist_id"
    ));
    push_filter(&mut builder, &query.filter, Utc::now());

    let (sort_by, sort_order) = query.effective_sort();
    let sort_column = match sort_by {
        SortBy::Title => "a.title",
        SortBy::ReleaseDate => "a.release_date",
        SortBy::Artist => "COALESCE(ar.name, '')",
    };
    builder
        .push(" ORDER BY ")
        .push(sort_column)
        .push(" ")
        .push(sort_order.as_sql())
        .push(", a.id ASC");

    if let Some((offset, limit)) = query.page() {
        builder
            .push(" LIMIT ")
            .push_bind(limit as i64)
            .push(" OFFSET ")
            .push_bind(offset as i64);
    }

    let rows = builder.build().fetch_all(pool).await?;
    rows.iter().map(from_row).collect()
}

/// Number of albums matching the filter
pub async fn count(pool: &SqlitePool, filter: &AlbumFilter) -> Result<i64> {
    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT COUNT(*) AS count FROM albums a LEFT JOIN artists ar ON ar.id = a.artist_id",
    );
    push_filter(&mut builder, filter, Utc::now());

    let row = builder.build().fetch_one(pool).await?;
    Ok(row.get("count"))
}

pub async fn get_ids_by_artist(
    conn: &mut SqliteConnection,
    artist_id: ArtistId,
) -> Result<Vec<AlbumId>> {
    let rows = sqlx::query("SELECT id FROM albums WHERE artist_id = ? ORDER BY id")
        .bind(artist_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows.iter().map(|row| row.get("id")).collect())
}

/// Create album
///
/// Missing artist or genre surfaces as [`GrooveError::InvalidInput`].
pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    let result = sqlx::query(
        r#"
        INSERT INTO albums (
            title, artist_id, cover_image, release_date, genre_id, total_duration, is_new
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&album.title)
    .bind(album.artist_id)
    .bind(&album.cover_image)
    .bind(album.release_date.timestamp())
    .bind(album.genre_id)
    .bind(album.total_duration)
    .bind(album.is_new)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| GrooveError::not_found("album", id))
}

pub async fn update_duration(pool: &SqlitePool, id: AlbumId, total_duration: i64) -> Result<()> {
    let result = sqlx::query("UPDATE albums SET total_duration = ? WHERE id = ?")
        .bind(total_duration)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(GrooveError::not_found("album", id));
    }

    Ok(())
}

/// Remove an album's tracks, its edges in both directions, then the album
///
/// Runs on a borrowed connection so artist deletion can share the transaction.
pub async fn delete_cascade(conn: &mut SqliteConnection, id: AlbumId) -> Result<()> {
    sqlx::query("DELETE FROM tracks WHERE album_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM related_albums WHERE album_id = ? OR related_album_id = ?")
        .bind(id)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Delete album with its tracks and relations
pub async fn delete(pool: &SqlitePool, id: AlbumId) -> Result<()> {
    let mut tx = pool.begin().await?;
    delete_cascade(&mut tx, id).await?;
    tx.commit().await?;

    tracing::debug!(album_id = id, "Deleted album");
    Ok(())
}
