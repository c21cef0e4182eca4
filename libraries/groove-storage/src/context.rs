use crate::{albums, artists, create_pool, genres, related_albums, run_migrations, tracks, users};
use async_trait::async_trait;
use groove_core::{error::Result, storage::CatalogStorage, types::*};
use sqlx::SqlitePool;

/// Catalog storage backed by `SQLite`
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database and bring the schema up to date
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CatalogStorage for SqliteCatalog {
    // Users
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        users::get_by_username(&self.pool, username).await
    }

    async fn create_user(&self, user: CreateUser) -> Result<User> {
        users::create(&self.pool, user).await
    }

    async fn get_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    // Artists
    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
        artists::get_by_id(&self.pool, id).await
    }

    async fn get_artists(&self) -> Result<Vec<Artist>> {
        artists::get_all(&self.pool).await
    }

    async fn get_artists_by_user(&self, user_id: UserId) -> Result<Vec<Artist>> {
        artists::get_by_user(&self.pool, user_id).await
    }

    async fn create_artist(&self, artist: CreateArtist) -> Result<Artist> {
        artists::create(&self.pool, artist).await
    }

    async fn delete_artist(&self, id: ArtistId) -> Result<()> {
        artists::delete(&self.pool, id).await
    }

    // Genres
    async fn get_genre(&self, id: GenreId) -> Result<Option<Genre>> {
        genres::get_by_id(&self.pool, id).await
    }

    async fn get_genres(&self) -> Result<Vec<Genre>> {
        genres::get_all(&self.pool).await
    }

    async fn create_genre(&self, genre: CreateGenre) -> Result<Genre> {
        genres::create(&self.pool, genre).await
    }

    // Albums
    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>> {
        albums::get_by_id(&self.pool, id).await
    }

    async fn get_albums(&self, query: &AlbumQuery) -> Result<Vec<Album>> {
        albums::get_filtered(&self.pool, query).await
    }

    async fn get_album_count(&self, filter: &AlbumFilter) -> Result<i64> {
        albums::count(&self.pool, filter).await
    }

    async fn create_album(&self, album: CreateAlbum) -> Result<Album> {
        albums::create(&self.pool, album).await
    }

    async fn update_album_duration(&self, album_id: AlbumId, total_duration: i64) -> Result<()> {
        albums::update_duration(&self.pool, album_id, total_duration).await
    }

    async fn delete_album(&self, id: AlbumId) -> Result<()> {
        albums::delete(&self.pool, id).await
    }

    // Tracks
    async fn get_track(&self, id: TrackId) -> Result<Option<Track>> {
        tracks::get_by_id(&self.pool, id).await
    }

    async fn get_tracks_by_album(&self, album_id: AlbumId) -> Result<Vec<Track>> {
        tracks::get_by_album(&self.pool, album_id).await
    }

    async fn create_track(&self, track: CreateTrack) -> Result<Track> {
        tracks::create(&self.pool, track).await
    }

    // Related albums
    async fn get_related_albums(&self, album_id: AlbumId) -> Result<Vec<Album>> {
        related_albums::get_related(&self.pool, album_id).await
    }

    async fn add_related_album(&self, album_id: AlbumId, related_album_id: AlbumId) -> Result<()> {
        related_albums::add(&self.pool, album_id, related_album_id).await
    }
}
