//! Integration tests for PgSearchStore.
//! Requires a Postgres instance. Set DATABASE_TEST_URL or these tests are skipped.

use socialsearch_common::{FavoriteRecord, Network, SearchRecord};
use socialsearch_store::{PgSearchStore, SearchStore};
use sqlx::PgPool;

/// Get a migrated, empty store, or skip if no test DB is available.
async fn test_store() -> Option<PgSearchStore> {
    let url = std::env::var("DATABASE_TEST_URL").ok()?;
    let pool = PgPool::connect(&url).await.ok()?;
    let store = PgSearchStore::new(pool.clone(), 3);
    store.migrate().await.ok()?;

    sqlx::query("TRUNCATE searches, favorite_searches RESTART IDENTITY")
        .execute(&pool)
        .await
        .ok()?;

    Some(store)
}

// Single test so the shared tables aren't truncated underneath a parallel run.
#[tokio::test]
async fn records_and_aggregates_searches() {
    let Some(store) = test_store().await else {
        return;
    };

    // --- empty ---
    let ranking = store.fetch_ranking().await.unwrap();
    assert!(ranking.is_empty());

    // --- leaderboard ---
    for (q, n) in [
        ("Sunset", Network::TikTok),
        ("sunset ", Network::TikTok),
        ("cats", Network::YouTube),
        ("cats", Network::YouTube),
        ("cats", Network::YouTube),
        ("dogs", Network::Instagram),
        ("birds", Network::Twitter),
        ("   ", Network::Twitter),
    ] {
        store.record_search(&SearchRecord::new(q, n)).await.unwrap();
    }

    let ranking = store.fetch_ranking().await.unwrap();
    assert_eq!(ranking.list.len(), 3);
    assert_eq!(ranking.list[0].query, "cats");
    assert_eq!(ranking.list[0].amount, 3);
    assert_eq!(ranking.list[1].query, "sunset");
    assert_eq!(ranking.list[1].network, "tiktok");
    assert_eq!(ranking.list[1].amount, 2);
    assert_eq!(ranking.list[2].query, "birds");
    assert_eq!(ranking.statistics.as_slice(), &[1, 2, 1, 3]);

    // --- favorites ---
    let fav = FavoriteRecord::new("cats", Network::YouTube);
    store.record_favorite(&fav).await.unwrap();
    store.record_favorite(&fav).await.unwrap();
    assert_eq!(store.favorites().await.unwrap(), vec![fav]);
}
