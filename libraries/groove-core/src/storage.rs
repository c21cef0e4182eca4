//! Storage trait shared by the in-memory and SQLite catalogs

use crate::error::Result;
use crate::types::{
    Album, AlbumFilter, AlbumId, AlbumQuery, AlbumSummary, AlbumWithDetails, Artist, ArtistId,
    CreateAlbum, CreateArtist, CreateGenre, CreateTrack, CreateUser, Genre, GenreId, Track,
    TrackId, User, UserId,
};
use async_trait::async_trait;

/// Catalog storage operations
///
/// Every backend must give identical results for identical call sequences,
/// so the request layer never needs to know which one it talks to. Lookups
/// report absence as `Ok(None)`, never as an error.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Get user by exact username
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Create a user; fails with `Duplicate` when the username is taken
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    /// Get all users ordered by username
    async fn get_users(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Artists
    // ========================================================================

    /// Get artist by ID
    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>>;

    /// Get all artists
    async fn get_artists(&self) -> Result<Vec<Artist>>;

    /// Get artists owned by a user
    async fn get_artists_by_user(&self, user_id: UserId) -> Result<Vec<Artist>>;

    /// Create a new artist
    async fn create_artist(&self, artist: CreateArtist) -> Result<Artist>;

    /// Delete an artist together with all of its albums
    async fn delete_artist(&self, id: ArtistId) -> Result<()>;

    // ========================================================================
    // Genres
    // ========================================================================

    /// Get genre by ID
    async fn get_genre(&self, id: GenreId) -> Result<Option<Genre>>;

    /// Get all genres
    async fn get_genres(&self) -> Result<Vec<Genre>>;

    /// Create a genre; fails with `Duplicate` when the name is taken
    async fn create_genre(&self, genre: CreateGenre) -> Result<Genre>;

    // ========================================================================
    // Albums
    // ========================================================================

    /// Get album by ID
    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>>;

    /// Filter, sort, then paginate albums
    async fn get_albums(&self, query: &AlbumQuery) -> Result<Vec<Album>>;

    /// Count albums matching the filter, ignoring pagination
    async fn get_album_count(&self, filter: &AlbumFilter) -> Result<i64>;

    /// Create an album; artist and genre must exist
    async fn create_album(&self, album: CreateAlbum) -> Result<Album>;

    /// Overwrite the stored total duration
    async fn update_album_duration(&self, album_id: AlbumId, total_duration: i64) -> Result<()>;

    /// Delete an album, its tracks, and every related-album edge touching it
    async fn delete_album(&self, id: AlbumId) -> Result<()>;

    /// Album with artist, genre, ordered tracks and related summaries
    ///
    /// Returns `None` when the album, its artist or its genre is missing.
    /// Related albums whose artist or genre is missing are skipped.
    async fn get_album_with_details(&self, id: AlbumId) -> Result<Option<AlbumWithDetails>> {
        let Some(album) = self.get_album(id).await? else {
            return Ok(None);
        };
        let Some(artist) = self.get_artist(album.artist_id).await? else {
            return Ok(None);
        };
        let Some(genre) = self.get_genre(album.genre_id).await? else {
            return Ok(None);
        };

        let tracks = self.get_tracks_by_album(id).await?;

        let mut related_albums = Vec::new();
        for related in self.get_related_albums(id).await? {
            let artist = self.get_artist(related.artist_id).await?;
            let genre = self.get_genre(related.genre_id).await?;
            if artist.is_some() && genre.is_some() {
                related_albums.push(AlbumSummary {
                    album: related,
                    artist,
                    genre,
                });
            }
        }

        Ok(Some(AlbumWithDetails {
            album,
            artist,
            genre,
            tracks,
            related_albums,
        }))
    }

    /// Attach artist and genre to each album, keeping order
    async fn summarize_albums(&self, albums: Vec<Album>) -> Result<Vec<AlbumSummary>> {
        let mut summaries = Vec::with_capacity(albums.len());
        for album in albums {
            let artist = self.get_artist(album.artist_id).await?;
            let genre = self.get_genre(album.genre_id).await?;
            summaries.push(AlbumSummary {
                album,
                artist,
                genre,
            });
        }
        Ok(summaries)
    }

    /// Recompute `total_duration` from the album's tracks and persist it
    ///
    /// This is the only place the aggregate is maintained; call it after
    /// every track-creating operation. Returns the new total.
    async fn refresh_album_duration(&self, album_id: AlbumId) -> Result<i64> {
        let total: i64 = self
            .get_tracks_by_album(album_id)
            .await?
            .iter()
            .map(|track| track.duration)
            .sum();
        self.update_album_duration(album_id, total).await?;
        Ok(total)
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Get track by ID
    async fn get_track(&self, id: TrackId) -> Result<Option<Track>>;

    /// Tracks of an album, ascending by track number
    async fn get_tracks_by_album(&self, album_id: AlbumId) -> Result<Vec<Track>>;

    /// Create a track; the album must exist
    async fn create_track(&self, track: CreateTrack) -> Result<Track>;

    // ========================================================================
    // Related albums
    // ========================================================================

    /// Albums on the far side of edges leaving `album_id`
    async fn get_related_albums(&self, album_id: AlbumId) -> Result<Vec<Album>>;

    /// Add the edge `album_id -> related_album_id`; adding it twice is a no-op
    async fn add_related_album(&self, album_id: AlbumId, related_album_id: AlbumId)
        -> Result<()>;
}
