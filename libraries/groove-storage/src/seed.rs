//! Demo catalog used by the in-memory backend and the `seed` command

use chrono::NaiveDate;
use groove_core::{
    error::{GrooveError, Result},
    storage::CatalogStorage,
    types::{CreateAlbum, CreateArtist, CreateGenre, CreateTrack},
};

const GENRES: [&str; 5] = ["Electronic", "Hip Hop", "Jazz", "Rock", "Indie"];

const ARTISTS: [(&str, &str); 8] = [
    ("Electron Pulse", "photo-1511379938547-c1f69419868d"),
    ("Luna Echo", "photo-1557672172-298e090bd0f1"),
    ("Rhythm Collective", "photo-1571330735066-03aaa9429d89"),
    ("Saxotone Quartet", "photo-1511379938547-c1f69419868d"),
    ("Amplified Youth", "photo-1508700115892-45ecd05ae2ad"),
    ("Synthwave Collective", "photo-1514525253161-7a46d19cd819"),
    ("Electric Dreams", "photo-1470225620780-dba8ba36b745"),
    ("Mountain Folk", "photo-1458560871784-56d23406c091"),
];

struct AlbumFixture {
    title: &'static str,
    /// Index into `ARTISTS`
    artist: usize,
    /// Index into `GENRES`
    genre: usize,
    cover: &'static str,
    released: (i32, u32, u32),
    total_duration: i64,
    is_new: i32,
}

const ALBUMS: [AlbumFixture; 8] = [
    AlbumFixture {
        title: "Chromatic Odyssey",
        artist: 0,
        genre: 0,
        cover: "photo-1493225457124-a3eb161ffa5f",
        released: (2023, 5, 15),
        total_duration: 2520,
        is_new: 1,
    },
    AlbumFixture {
        title: "Midnight Rain",
        artist: 1,
        genre: 4,
        cover: "photo-1557672172-298e090bd0f1",
        released: (2023, 4, 28),
        total_duration: 2220,
        is_new: 0,
    },
    AlbumFixture {
        title: "Urban Echoes",
        artist: 2,
        genre: 1,
        cover: "photo-1571330735066-03aaa9429d89",
        released: (2023, 5, 8),
        total_duration: 2700,
        is_new: 1,
    },
    AlbumFixture {
        title: "Harmonic Convergence",
        artist: 3,
        genre: 2,
        cover: "photo-1511379938547-c1f69419868d",
        released: (2023, 3, 15),
        total_duration: 3000,
        is_new: 0,
    },
    AlbumFixture {
        title: "Sonic Revolution",
        artist: 4,
        genre: 3,
        cover: "photo-1508700115892-45ecd05ae2ad",
        released: (2023, 4, 2),
        total_duration: 2640,
        is_new: 0,
    },
    AlbumFixture {
        title: "Digital Dreams",
        artist: 5,
        genre: 0,
        cover: "photo-1514525253161-7a46d19cd819",
        released: (2023, 5, 1),
        total_duration: 2760,
        is_new: 0,
    },
    AlbumFixture {
        title: "Neon Nights",
        artist: 6,
        genre: 0,
        cover: "photo-1470225620780-dba8ba36b745",
        released: (2023, 4, 12),
        total_duration: 2460,
        is_new: 0,
    },
    AlbumFixture {
        title: "Acoustic Sessions",
        artist: 7,
        genre: 4,
        cover: "photo-1458560871784-56d23406c091",
        released: (2023, 3, 24),
        total_duration: 2340,
        is_new: 0,
    },
];

/// Track list of the first album: (title, seconds)
const OPENING_TRACKS: [(&str, i64); 8] = [
    ("Digital Dawn", 225),
    ("Neon Cascade", 252),
    ("Quantum Pulse", 318),
    ("Synth Symphony", 362),
    ("Chromatic Revolution", 295),
    ("Electric Dreams", 336),
    ("Binary Sunset", 261),
    ("Digital Afterglow", 432),
];

/// Edges as indices into `ALBUMS`
const RELATIONS: [(usize, usize); 4] = [(0, 5), (0, 6), (1, 7), (5, 6)];

fn unsplash(photo: &str) -> String {
    format!(
        "https://images.unsplash.com/{photo}?ixlib=rb-4.0.3&q=85&fm=jpg&crop=entropy&cs=srgb&w=400"
    )
}

/// Fill an empty catalog with the demo data
///
/// Returns `false` without writing anything when genres already exist.
pub async fn seed_demo_catalog(catalog: &dyn CatalogStorage) -> Result<bool> {
    if !catalog.get_genres().await?.is_empty() {
        tracing::info!("Catalog already has genres, skipping demo seed");
        return Ok(false);
    }

    let mut genre_ids = Vec::with_capacity(GENRES.len());
    for name in GENRES {
        let genre = catalog
            .create_genre(CreateGenre {
                name: name.to_string(),
            })
            .await?;
        genre_ids.push(genre.id);
    }

    let mut artist_ids = Vec::with_capacity(ARTISTS.len());
    for (name, photo) in ARTISTS {
        let artist = catalog
            .create_artist(CreateArtist {
                name: name.to_string(),
                image: Some(unsplash(photo)),
                user_id: None,
            })
            .await?;
        artist_ids.push(artist.id);
    }

    let mut album_ids = Vec::with_capacity(ALBUMS.len());
    for fixture in &ALBUMS {
        let (year, month, day) = fixture.released;
        let release_date = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| {
                GrooveError::invalid_input(format!("bad fixture date for {}", fixture.title))
            })?;

        let album = catalog
            .create_album(CreateAlbum {
                title: fixture.title.to_string(),
                artist_id: artist_ids[fixture.artist],
                cover_image: Some(unsplash(fixture.cover)),
                release_date,
                genre_id: genre_ids[fixture.genre],
                total_duration: Some(fixture.total_duration),
                is_new: fixture.is_new,
            })
            .await?;
        album_ids.push(album.id);
    }

    let opening_album = album_ids[0];
    for (number, (title, duration)) in (1..).zip(OPENING_TRACKS) {
        catalog
            .create_track(CreateTrack {
                title: title.to_string(),
                album_id: opening_album,
                track_number: number,
                duration,
                audio_file: None,
            })
            .await?;
    }
    catalog.refresh_album_duration(opening_album).await?;

    for (from, to) in RELATIONS {
        catalog
            .add_related_album(album_ids[from], album_ids[to])
            .await?;
    }

    tracing::info!(
        genres = genre_ids.len(),
        artists = artist_ids.len(),
        albums = album_ids.len(),
        "Seeded demo catalog"
    );
    Ok(true)
}
