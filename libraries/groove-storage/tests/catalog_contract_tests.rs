//! Behaviour every catalog backend must share
//!
//! Each scenario is written once against `&dyn CatalogStorage` and run
//! against both the in-memory and the SQLite catalog.

use chrono::{Duration, TimeZone, Utc};
use groove_core::{types::*, CatalogStorage, GrooveError};

use test_helpers::{create_test_album, create_test_artist, create_test_genre, create_test_track};

macro_rules! for_both_backends {
    ($($name:ident),* $(,)?) => {
        mod memory_backend {
            $(
                #[tokio::test]
                async fn $name() {
                    let catalog = groove_storage::MemoryCatalog::new();
                    super::$name(&catalog).await;
                }
            )*
        }

        mod sqlite_backend {
            $(
                #[tokio::test]
                async fn $name() {
                    let db = super::test_helpers::TestDb::new().await;
                    super::$name(&db.catalog).await;
                }
            )*
        }
    };
}

for_both_backends!(
    total_duration_is_sum_of_tracks,
    related_edges_are_directed_and_idempotent,
    delete_album_removes_tracks_and_edges,
    delete_artist_cascades_to_albums,
    tracks_are_ordered_by_track_number,
    genre_filter_and_count_agree,
    week_timeframe_excludes_old_and_future_albums,
    search_matches_title_or_artist,
    sort_orders_and_tie_breaks,
    pagination_applies_only_with_limit,
    dangling_references_are_rejected,
    duplicates_are_rejected,
    ids_are_never_reused,
    album_details_include_tracks_and_related,
    users_are_found_by_username,
    demo_seed_runs_once,
);

fn days_ago(days: i64) -> chrono::DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

async fn total_duration_is_sum_of_tracks(catalog: &dyn CatalogStorage) {
    let jazz = create_test_genre(catalog, "Jazz").await;
    let artist = create_test_artist(catalog, "X").await;
    let album = create_test_album(catalog, "Y", artist.id, jazz.id, days_ago(3)).await;
    assert_eq!(album.total_duration, None);

    create_test_track(catalog, album.id, 1, 200).await;
    assert_eq!(catalog.refresh_album_duration(album.id).await.unwrap(), 200);

    create_test_track(catalog, album.id, 2, 300).await;
    assert_eq!(catalog.refresh_album_duration(album.id).await.unwrap(), 500);

    let stored = catalog.get_album(album.id).await.unwrap().unwrap();
    assert_eq!(stored.total_duration, Some(500));
}

async fn related_edges_are_directed_and_idempotent(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Electronic").await;
    let artist = create_test_artist(catalog, "Electron Pulse").await;
    let a = create_test_album(catalog, "A", artist.id, genre.id, days_ago(1)).await;
    let b = create_test_album(catalog, "B", artist.id, genre.id, days_ago(2)).await;

    catalog.add_related_album(a.id, b.id).await.unwrap();
    catalog.add_related_album(a.id, b.id).await.unwrap();

    let related = catalog.get_related_albums(a.id).await.unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, b.id);

    assert!(catalog.get_related_albums(b.id).await.unwrap().is_empty());
}

async fn delete_album_removes_tracks_and_edges(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Indie").await;
    let artist = create_test_artist(catalog, "Luna Echo").await;
    let a = create_test_album(catalog, "Midnight Rain", artist.id, genre.id, days_ago(1)).await;
    let b = create_test_album(catalog, "Acoustic", artist.id, genre.id, days_ago(2)).await;
    let c = create_test_album(catalog, "Other", artist.id, genre.id, days_ago(3)).await;
    let track = create_test_track(catalog, a.id, 1, 180).await;

    catalog.add_related_album(a.id, b.id).await.unwrap();
    catalog.add_related_album(c.id, a.id).await.unwrap();
    catalog.add_related_album(c.id, b.id).await.unwrap();

    catalog.delete_album(a.id).await.unwrap();

    assert!(catalog.get_album(a.id).await.unwrap().is_none());
    assert!(catalog.get_track(track.id).await.unwrap().is_none());
    assert!(catalog.get_tracks_by_album(a.id).await.unwrap().is_empty());
    assert!(catalog.get_related_albums(a.id).await.unwrap().is_empty());

    let from_c: Vec<AlbumId> = catalog
        .get_related_albums(c.id)
        .await
        .unwrap()
        .iter()
        .map(|album| album.id)
        .collect();
    assert_eq!(from_c, vec![b.id]);
}

async fn delete_artist_cascades_to_albums(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Rock").await;
    let doomed = create_test_artist(catalog, "Amplified Youth").await;
    let survivor = create_test_artist(catalog, "Mountain Folk").await;

    let first = create_test_album(catalog, "Sonic", doomed.id, genre.id, days_ago(1)).await;
    let second = create_test_album(catalog, "Revolution", doomed.id, genre.id, days_ago(2)).await;
    let kept = create_test_album(catalog, "Sessions", survivor.id, genre.id, days_ago(3)).await;
    let track = create_test_track(catalog, first.id, 1, 240).await;
    catalog.add_related_album(kept.id, second.id).await.unwrap();

    catalog.delete_artist(doomed.id).await.unwrap();

    assert!(catalog.get_artist(doomed.id).await.unwrap().is_none());
    assert!(catalog.get_album(first.id).await.unwrap().is_none());
    assert!(catalog.get_album(second.id).await.unwrap().is_none());
    assert!(catalog.get_track(track.id).await.unwrap().is_none());
    assert!(catalog.get_related_albums(kept.id).await.unwrap().is_empty());
    assert!(catalog.get_album(kept.id).await.unwrap().is_some());
}

async fn tracks_are_ordered_by_track_number(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Electronic").await;
    let artist = create_test_artist(catalog, "Synthwave Collective").await;
    let album = create_test_album(catalog, "Digital", artist.id, genre.id, days_ago(1)).await;

    let third = create_test_track(catalog, album.id, 3, 100).await;
    let first = create_test_track(catalog, album.id, 1, 100).await;
    let second_a = create_test_track(catalog, album.id, 2, 100).await;
    let second_b = create_test_track(catalog, album.id, 2, 100).await;

    let ids: Vec<TrackId> = catalog
        .get_tracks_by_album(album.id)
        .await
        .unwrap()
        .iter()
        .map(|track| track.id)
        .collect();
    assert_eq!(ids, vec![first.id, second_a.id, second_b.id, third.id]);
}

async fn genre_filter_and_count_agree(catalog: &dyn CatalogStorage) {
    let electronic = create_test_genre(catalog, "Electronic").await;
    let jazz = create_test_genre(catalog, "Jazz").await;
    let artist = create_test_artist(catalog, "Various").await;

    for i in 0..3 {
        create_test_album(catalog, &format!("E{i}"), artist.id, electronic.id, days_ago(i)).await;
    }
    create_test_album(catalog, "J", artist.id, jazz.id, days_ago(1)).await;

    let filter = AlbumFilter {
        genre_id: Some(electronic.id),
        ..AlbumFilter::default()
    };
    let albums = catalog
        .get_albums(&AlbumQuery::with_filter(filter.clone()))
        .await
        .unwrap();
    assert_eq!(albums.len(), 3);
    assert!(albums.iter().all(|album| album.genre_id == electronic.id));
    assert_eq!(catalog.get_album_count(&filter).await.unwrap(), 3);
    assert_eq!(catalog.get_album_count(&AlbumFilter::default()).await.unwrap(), 4);
}

async fn week_timeframe_excludes_old_and_future_albums(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Hip Hop").await;
    let artist = create_test_artist(catalog, "Rhythm Collective").await;

    let recent = create_test_album(catalog, "Recent", artist.id, genre.id, days_ago(6)).await;
    create_test_album(catalog, "Old", artist.id, genre.id, days_ago(8)).await;
    create_test_album(catalog, "Upcoming", artist.id, genre.id, days_ago(-2)).await;

    let filter = AlbumFilter {
        timeframe: Some(Timeframe::Week),
        ..AlbumFilter::default()
    };
    let albums = catalog
        .get_albums(&AlbumQuery::with_filter(filter.clone()))
        .await
        .unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].id, recent.id);
    assert_eq!(catalog.get_album_count(&filter).await.unwrap(), 1);

    let yearly = AlbumFilter {
        timeframe: Some(Timeframe::Year),
        ..AlbumFilter::default()
    };
    assert_eq!(catalog.get_album_count(&yearly).await.unwrap(), 2);
}

async fn search_matches_title_or_artist(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Electronic").await;
    let neon = create_test_artist(catalog, "Neon Collective").await;
    let other = create_test_artist(catalog, "Luna Echo").await;

    let by_artist = create_test_album(catalog, "Afterglow", neon.id, genre.id, days_ago(1)).await;
    let by_title = create_test_album(catalog, "NEON Nights", other.id, genre.id, days_ago(2)).await;
    create_test_album(catalog, "Midnight Rain", other.id, genre.id, days_ago(3)).await;

    let filter = AlbumFilter {
        search: Some("neon".to_string()),
        ..AlbumFilter::default()
    };
    let ids: Vec<AlbumId> = catalog
        .get_albums(&AlbumQuery::with_filter(filter.clone()))
        .await
        .unwrap()
        .iter()
        .map(|album| album.id)
        .collect();
    assert_eq!(ids, vec![by_artist.id, by_title.id]);
    assert_eq!(catalog.get_album_count(&filter).await.unwrap(), 2);

    let empty = AlbumFilter {
        search: Some(String::new()),
        ..AlbumFilter::default()
    };
    assert_eq!(catalog.get_album_count(&empty).await.unwrap(), 3);
}

async fn sort_orders_and_tie_breaks(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Rock").await;
    let zed = create_test_artist(catalog, "Zed").await;
    let abe = create_test_artist(catalog, "Abe").await;
    let same_day = Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap();

    let beta = create_test_album(catalog, "beta", zed.id, genre.id, same_day).await;
    let alpha_upper = create_test_album(catalog, "Alpha", abe.id, genre.id, same_day).await;
    let alpha_lower = create_test_album(
        catalog,
        "alpha",
        zed.id,
        genre.id,
        same_day - Duration::days(10),
    )
    .await;

    let ids = |albums: Vec<Album>| albums.iter().map(|a| a.id).collect::<Vec<_>>();

    // Newest first; equal dates fall back to ascending id
    let default_order = catalog.get_albums(&AlbumQuery::default()).await.unwrap();
    assert_eq!(
        ids(default_order),
        vec![beta.id, alpha_upper.id, alpha_lower.id]
    );

    let by_title = AlbumQuery {
        sort_by: Some(SortBy::Title),
        sort_order: Some(SortOrder::Asc),
        ..AlbumQuery::default()
    };
    assert_eq!(
        ids(catalog.get_albums(&by_title).await.unwrap()),
        vec![alpha_upper.id, alpha_lower.id, beta.id]
    );

    let by_artist_desc = AlbumQuery {
        sort_by: Some(SortBy::Artist),
        sort_order: Some(SortOrder::Desc),
        ..AlbumQuery::default()
    };
    assert_eq!(
        ids(catalog.get_albums(&by_artist_desc).await.unwrap()),
        vec![beta.id, alpha_lower.id, alpha_upper.id]
    );
}

async fn pagination_applies_only_with_limit(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Jazz").await;
    let artist = create_test_artist(catalog, "Saxotone Quartet").await;
    let mut created = Vec::new();
    for i in 0..5 {
        created.push(create_test_album(catalog, &format!("Set {i}"), artist.id, genre.id, days_ago(i)).await);
    }

    let page = AlbumQuery {
        limit: Some(2),
        offset: Some(1),
        ..AlbumQuery::default()
    };
    let albums = catalog.get_albums(&page).await.unwrap();
    assert_eq!(
        albums.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![created[1].id, created[2].id]
    );

    let offset_only = AlbumQuery {
        offset: Some(3),
        ..AlbumQuery::default()
    };
    assert_eq!(catalog.get_albums(&offset_only).await.unwrap().len(), 5);

    let past_end = AlbumQuery {
        limit: Some(10),
        offset: Some(10),
        ..AlbumQuery::default()
    };
    assert!(catalog.get_albums(&past_end).await.unwrap().is_empty());
    assert_eq!(catalog.get_album_count(&AlbumFilter::default()).await.unwrap(), 5);
}

async fn dangling_references_are_rejected(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Indie").await;
    let artist = create_test_artist(catalog, "Mountain Folk").await;

    let missing_artist = catalog
        .create_album(CreateAlbum {
            title: "Ghost".to_string(),
            artist_id: 999,
            cover_image: None,
            release_date: days_ago(1),
            genre_id: genre.id,
            total_duration: None,
            is_new: 0,
        })
        .await;
    assert!(matches!(missing_artist, Err(GrooveError::InvalidInput(_))));

    let missing_genre = catalog
        .create_album(CreateAlbum {
            title: "Ghost".to_string(),
            artist_id: artist.id,
            cover_image: None,
            release_date: days_ago(1),
            genre_id: 999,
            total_duration: None,
            is_new: 0,
        })
        .await;
    assert!(matches!(missing_genre, Err(GrooveError::InvalidInput(_))));

    let missing_album = catalog
        .create_track(CreateTrack {
            title: "Lost".to_string(),
            album_id: 999,
            track_number: 1,
            duration: 60,
            audio_file: None,
        })
        .await;
    assert!(matches!(missing_album, Err(GrooveError::InvalidInput(_))));

    let album = create_test_album(catalog, "Real", artist.id, genre.id, days_ago(1)).await;
    let zero_track = catalog
        .create_track(CreateTrack {
            title: "Zero".to_string(),
            album_id: album.id,
            track_number: 0,
            duration: 60,
            audio_file: None,
        })
        .await;
    assert!(matches!(zero_track, Err(GrooveError::InvalidInput(_))));

    let dangling_edge = catalog.add_related_album(album.id, 999).await;
    assert!(matches!(dangling_edge, Err(GrooveError::InvalidInput(_))));

    let missing_owner = catalog
        .create_artist(CreateArtist {
            name: "Nobody's".to_string(),
            user_id: Some(999),
            ..CreateArtist::default()
        })
        .await;
    assert!(matches!(missing_owner, Err(GrooveError::InvalidInput(_))));
}

async fn duplicates_are_rejected(catalog: &dyn CatalogStorage) {
    create_test_genre(catalog, "Rock").await;
    let again = catalog
        .create_genre(CreateGenre {
            name: "Rock".to_string(),
        })
        .await;
    assert!(matches!(again, Err(GrooveError::Duplicate(_))));

    let user = CreateUser {
        username: "dj".to_string(),
        password: "hash".to_string(),
        role: Role::User,
    };
    catalog.create_user(user.clone()).await.unwrap();
    assert!(matches!(
        catalog.create_user(user).await,
        Err(GrooveError::Duplicate(_))
    ));
}

async fn ids_are_never_reused(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Electronic").await;
    let artist = create_test_artist(catalog, "Electric Dreams").await;
    let first = create_test_album(catalog, "First", artist.id, genre.id, days_ago(1)).await;
    catalog.delete_album(first.id).await.unwrap();

    let second = create_test_album(catalog, "Second", artist.id, genre.id, days_ago(1)).await;
    assert!(second.id > first.id);
}

async fn album_details_include_tracks_and_related(catalog: &dyn CatalogStorage) {
    let genre = create_test_genre(catalog, "Electronic").await;
    let artist = create_test_artist(catalog, "Electron Pulse").await;
    let album = create_test_album(catalog, "Chromatic", artist.id, genre.id, days_ago(1)).await;
    let related = create_test_album(catalog, "Neon", artist.id, genre.id, days_ago(2)).await;
    create_test_track(catalog, album.id, 2, 120).await;
    create_test_track(catalog, album.id, 1, 180).await;
    catalog.add_related_album(album.id, related.id).await.unwrap();

    let details = catalog
        .get_album_with_details(album.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.album.id, album.id);
    assert_eq!(details.artist, artist);
    assert_eq!(details.genre, genre);
    assert_eq!(
        details.tracks.iter().map(|t| t.track_number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(details.related_albums.len(), 1);
    assert_eq!(details.related_albums[0].album.id, related.id);
    assert_eq!(details.related_albums[0].artist.as_ref(), Some(&artist));

    assert!(catalog.get_album_with_details(999).await.unwrap().is_none());
}

async fn users_are_found_by_username(catalog: &dyn CatalogStorage) {
    let admin = catalog
        .create_user(CreateUser {
            username: "admin".to_string(),
            password: "$2b$12$hash".to_string(),
            role: Role::Admin,
        })
        .await
        .unwrap();
    assert!(admin.is_admin());

    let found = catalog.get_user_by_username("admin").await.unwrap().unwrap();
    assert_eq!(found, admin);
    assert_eq!(found.password, "$2b$12$hash");
    assert!(catalog.get_user_by_username("Admin").await.unwrap().is_none());

    let owned = catalog
        .create_artist(CreateArtist {
            name: "Admin's Band".to_string(),
            user_id: Some(admin.id),
            ..CreateArtist::default()
        })
        .await
        .unwrap();
    let mine = catalog.get_artists_by_user(admin.id).await.unwrap();
    assert_eq!(mine, vec![owned]);
}

async fn demo_seed_runs_once(catalog: &dyn CatalogStorage) {
    assert!(groove_storage::seed_demo_catalog(catalog).await.unwrap());
    assert!(!groove_storage::seed_demo_catalog(catalog).await.unwrap());

    assert_eq!(catalog.get_genres().await.unwrap().len(), 5);
    assert_eq!(catalog.get_artists().await.unwrap().len(), 8);
    assert_eq!(catalog.get_album_count(&AlbumFilter::default()).await.unwrap(), 8);

    let opening = catalog.get_album(1).await.unwrap().unwrap();
    assert_eq!(opening.title, "Chromatic Odyssey");
    assert_eq!(opening.total_duration, Some(2481));
    assert_eq!(catalog.get_tracks_by_album(1).await.unwrap().len(), 8);
    assert_eq!(catalog.get_related_albums(1).await.unwrap().len(), 2);
}
