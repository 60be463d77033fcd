//! SQLite persistent cache

use commit_progress::domain::model::CacheEntry;
use commit_progress::domain::traits::ProgressStore;
use commit_progress::infrastructure::storage::db::SqliteStore;

fn entry(key: &str, count: u64, timestamp: i64) -> CacheEntry {
    CacheEntry {
        key: key.to_string(),
        timestamp,
        count,
    }
}

#[tokio::test]
async fn test_missing_key_is_none() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    assert!(store.load("nope").await.unwrap().is_none());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_save_overwrites() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.save(&entry("k", 1, 100)).await.unwrap();
    store.save(&entry("k", 2, 200)).await.unwrap();

    assert_eq!(store.load("k").await.unwrap(), Some(entry("k", 2, 200)));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_creates_directory_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cache").join("progress.db");

    {
        let store = SqliteStore::open(&path).await.unwrap();
        store.save(&entry("k", 732, 1_700_000_000_000)).await.unwrap();
    }
    assert!(path.exists());

    let reopened = SqliteStore::open(&path).await.unwrap();
    assert_eq!(
        reopened.load("k").await.unwrap(),
        Some(entry("k", 732, 1_700_000_000_000))
    );
}
