//! Property-based tests for album filtering
//!
//! Random catalogs are loaded into a backend, then filtered by genre; every
//! returned album must carry that genre and the count must match.

use chrono::{Duration, Utc};
use groove_core::{types::*, CatalogStorage};
use proptest::prelude::*;

use test_helpers::{create_test_album, create_test_artist, create_test_genre};

/// Genre index (0..3) and age in days for each album
fn arbitrary_catalog() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0usize..3, 0i64..400), 0..25)
}

async fn check_genre_filter(catalog: &dyn CatalogStorage, albums: &[(usize, i64)], pick: usize) {
    let artist = create_test_artist(catalog, "Various").await;
    let mut genre_ids = Vec::new();
    for name in ["Electronic", "Jazz", "Rock"] {
        genre_ids.push(create_test_genre(catalog, name).await.id);
    }

    for (i, (genre, age)) in albums.iter().enumerate() {
        create_test_album(
            catalog,
            &format!("Album {i}"),
            artist.id,
            genre_ids[*genre],
            Utc::now() - Duration::days(*age),
        )
        .await;
    }

    let wanted = genre_ids[pick];
    let filter = AlbumFilter {
        genre_id: Some(wanted),
        ..AlbumFilter::default()
    };
    let found = catalog
        .get_albums(&AlbumQuery::with_filter(filter.clone()))
        .await
        .unwrap();
    let expected = albums.iter().filter(|(genre, _)| *genre == pick).count();

    assert!(found.iter().all(|album| album.genre_id == wanted));
    assert_eq!(found.len(), expected);
    assert_eq!(catalog.get_album_count(&filter).await.unwrap(), expected as i64);

    // Newest first
    assert!(found
        .windows(2)
        .all(|pair| pair[0].release_date >= pair[1].release_date));
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().expect("Failed to build runtime")
}

proptest! {
    /// Property: genre filter returns exactly the albums of that genre (memory)
    #[test]
    fn memory_genre_filter_is_exact(albums in arbitrary_catalog(), pick in 0usize..3) {
        runtime().block_on(async {
            let catalog = groove_storage::MemoryCatalog::new();
            check_genre_filter(&catalog, &albums, pick).await;
        });
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Property: genre filter returns exactly the albums of that genre (SQLite)
    #[test]
    fn sqlite_genre_filter_is_exact(albums in arbitrary_catalog(), pick in 0usize..3) {
        runtime().block_on(async {
            let db = test_helpers::TestDb::new().await;
            check_genre_filter(&db.catalog, &albums, pick).await;
        });
    }
}
