//! In-memory catalog
//!
//! Everything lives in ordered maps behind one async `RwLock`. Ids come from
//! per-entity counters that only ever grow, so a deleted id is never handed
//! out again. Referential and uniqueness checks mirror the `SQLite` schema so
//! both backends reject the same writes.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use groove_core::{
    error::{GrooveError, Result},
    storage::CatalogStorage,
    types::*,
};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

#[derive(Default)]
struct Counters {
    user: i64,
    artist: i64,
    genre: i64,
    album: i64,
    track: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Default)]
struct CatalogState {
    users: BTreeMap<UserId, User>,
    artists: BTreeMap<ArtistId, Artist>,
    genres: BTreeMap<GenreId, Genre>,
    albums: BTreeMap<AlbumId, Album>,
    tracks: BTreeMap<TrackId, Track>,
    relations: BTreeMap<AlbumId, BTreeSet<AlbumId>>,
    ids: Counters,
}

impl CatalogState {
    fn artist_name(&self, artist_id: ArtistId) -> Option<&str> {
        self.artists.get(&artist_id).map(|a| a.name.as_str())
    }

    fn remove_album(&mut self, id: AlbumId) {
        self.tracks.retain(|_, track| track.album_id != id);
        self.relations.remove(&id);
        for targets in self.relations.values_mut() {
            targets.remove(&id);
        }
        self.relations.retain(|_, targets| !targets.is_empty());
        self.albums.remove(&id);
    }
}

/// Catalog storage kept entirely in process memory
#[derive(Default)]
pub struct MemoryCatalog {
    state: RwLock<CatalogState>,
}

impl MemoryCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-filled with the demo genres, artists, albums and tracks
    pub async fn with_demo_catalog() -> Result<Self> {
        let catalog = Self::new();
        crate::seed_demo_catalog(&catalog).await?;
        Ok(catalog)
    }
}

#[async_trait]
impl CatalogStorage for MemoryCatalog {
    // Users
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: CreateUser) -> Result<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.username == user.username) {
            return Err(GrooveError::duplicate(format!(
                "username already taken: {}",
                user.username
            )));
        }

        let id = next(&mut state.ids.user);
        let user = User {
            id,
            username: user.username,
            password: user.password,
            role: user.role,
        };
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_users(&self) -> Result<Vec<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    // Artists
    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
        Ok(self.state.read().await.artists.get(&id).cloned())
    }

    async fn get_artists(&self) -> Result<Vec<Artist>> {
        Ok(self.state.read().await.artists.values().cloned().collect())
    }

    async fn get_artists_by_user(&self, user_id: UserId) -> Result<Vec<Artist>> {
        let state = self.state.read().await;
        Ok(state
            .artists
            .values()
            .filter(|artist| artist.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create_artist(&self, artist: CreateArtist) -> Result<Artist> {
        let mut state = self.state.write().await;
        if let Some(user_id) = artist.user_id {
            if !state.users.contains_key(&user_id) {
                return Err(GrooveError::invalid_input(format!(
                    "user does not exist: {user_id}"
                )));
            }
        }

        let id = next(&mut state.ids.artist);
        let artist = Artist {
            id,
            name: artist.name,
            image: artist.image,
            user_id: artist.user_id,
        };
        state.artists.insert(id, artist.clone());
        Ok(artist)
    }

    async fn delete_artist(&self, id: ArtistId) -> Result<()> {
        let mut state = self.state.write().await;
        let owned: Vec<AlbumId> = state
            .albums
            .values()
            .filter(|album| album.artist_id == id)
            .map(|album| album.id)
            .collect();

        for album_id in &owned {
            state.remove_album(*album_id);
        }
        state.artists.remove(&id);

        tracing::debug!(artist_id = id, albums = owned.len(), "Deleted artist");
        Ok(())
    }

    // Genres
    async fn get_genre(&self, id: GenreId) -> Result<Option<Genre>> {
        Ok(self.state.read().await.genres.get(&id).cloned())
    }

    async fn get_genres(&self) -> Result<Vec<Genre>> {
        Ok(self.state.read().await.genres.values().cloned().collect())
    }

    async fn create_genre(&self, genre: CreateGenre) -> Result<Genre> {
        let mut state = self.state.write().await;
        if state.genres.values().any(|g| g.name == genre.name) {
            return Err(GrooveError::duplicate(format!(
                "genre already exists: {}",
                genre.name
            )));
        }

        let id = next(&mut state.ids.genre);
        let genre = Genre {
            id,
            name: genre.name,
        };
        state.genres.insert(id, genre.clone());
        Ok(genre)
    }

    // Albums
    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>> {
        Ok(self.state.read().await.albums.get(&id).cloned())
    }

    async fn get_albums(&self, query: &AlbumQuery) -> Result<Vec<Album>> {
        let now = Utc::now().trunc_subsecs(0);
        let state = self.state.read().await;

        let mut matching: Vec<(&Album, &str)> = state
            .albums
            .values()
            .filter(|album| {
                query
                    .filter
                    .matches(album, state.artist_name(album.artist_id), now)
            })
            .map(|album| (album, state.artist_name(album.artist_id).unwrap_or("")))
            .collect();

        let (sort_by, sort_order) = query.effective_sort();
        matching.sort_by(|(a, a_artist), (b, b_artist)| {
            let ordering = match sort_by {
                SortBy::Title => a.title.cmp(&b.title),
                SortBy::ReleaseDate => a.release_date.cmp(&b.release_date),
                SortBy::Artist => a_artist.cmp(b_artist),
            };
            sort_order.apply(ordering).then(a.id.cmp(&b.id))
        });

        let albums = matching.into_iter().map(|(album, _)| album.clone());
        Ok(match query.page() {
            Some((offset, limit)) => albums.skip(offset).take(limit).collect(),
            None => albums.collect(),
        })
    }

    async fn get_album_count(&self, filter: &AlbumFilter) -> Result<i64> {
        let now = Utc::now().trunc_subsecs(0);
        let state = self.state.read().await;
        let count = state
            .albums
            .values()
            .filter(|album| filter.matches(album, state.artist_name(album.artist_id), now))
            .count();
        Ok(count as i64)
    }

    async fn create_album(&self, album: CreateAlbum) -> Result<Album> {
        let mut state = self.state.write().await;
        if !state.artists.contains_key(&album.artist_id) {
            return Err(GrooveError::invalid_input(format!(
                "artist does not exist: {}",
                album.artist_id
            )));
        }
        if !state.genres.contains_key(&album.genre_id) {
            return Err(GrooveError::invalid_input(format!(
                "genre does not exist: {}",
                album.genre_id
            )));
        }

        let id = next(&mut state.ids.album);
        let album = Album {
            id,
            title: album.title,
            artist_id: album.artist_id,
            cover_image: album.cover_image,
            release_date: album.release_date.trunc_subsecs(0),
            genre_id: album.genre_id,
            total_duration: album.total_duration,
            is_new: album.is_new,
        };
        state.albums.insert(id, album.clone());
        Ok(album)
    }

    async fn update_album_duration(&self, album_id: AlbumId, total_duration: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let album = state
            .albums
            .get_mut(&album_id)
            .ok_or_else(|| GrooveError::not_found("album", album_id))?;
        album.total_duration = Some(total_duration);
        Ok(())
    }

    async fn delete_album(&self, id: AlbumId) -> Result<()> {
        self.state.write().await.remove_album(id);
        tracing::debug!(album_id = id, "Deleted album");
        Ok(())
    }

    // Tracks
    async fn get_track(&self, id: TrackId) -> Result<Option<Track>> {
        Ok(self.state.read().await.tracks.get(&id).cloned())
    }

    async fn get_tracks_by_album(&self, album_id: AlbumId) -> Result<Vec<Track>> {
        let state = self.state.read().await;
        let mut tracks: Vec<Track> = state
            .tracks
            .values()
            .filter(|track| track.album_id == album_id)
            .cloned()
            .collect();
        // Map order is by id, so a stable sort keeps id as the tie-breaker
        tracks.sort_by_key(|track| track.track_number);
        Ok(tracks)
    }

    async fn create_track(&self, track: CreateTrack) -> Result<Track> {
        let mut state = self.state.write().await;
        if !state.albums.contains_key(&track.album_id) {
            return Err(GrooveError::invalid_input(format!(
                "album does not exist: {}",
                track.album_id
            )));
        }
        if track.track_number < 1 {
            return Err(GrooveError::invalid_input(
                "track number must be positive",
            ));
        }

        let id = next(&mut state.ids.track);
        let track = Track {
            id,
            title: track.title,
            album_id: track.album_id,
            track_number: track.track_number,
            duration: track.duration,
            audio_file: track.audio_file,
        };
        state.tracks.insert(id, track.clone());
        Ok(track)
    }

    // Related albums
    async fn get_related_albums(&self, album_id: AlbumId) -> Result<Vec<Album>> {
        let state = self.state.read().await;
        let Some(targets) = state.relations.get(&album_id) else {
            return Ok(Vec::new());
        };
        Ok(targets
            .iter()
            .filter_map(|id| state.albums.get(id))
            .cloned()
            .collect())
    }

    async fn add_related_album(&self, album_id: AlbumId, related_album_id: AlbumId) -> Result<()> {
        let mut state = self.state.write().await;
        for id in [album_id, related_album_id] {
            if !state.albums.contains_key(&id) {
                return Err(GrooveError::invalid_input(format!(
                    "album does not exist: {id}"
                )));
            }
        }

        state
            .relations
            .entry(album_id)
            .or_default()
            .insert(related_album_id);
        Ok(())
    }
}
