use crate::domain::error::ProgressError;
use crate::domain::model::{CacheEntry, Extraction};
use async_trait::async_trait;

/// Source of raw profile documents.
///
/// Implementations return the document text, `SubjectNotFound` when the
/// upstream says the user does not exist, or a transport error.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// URL the document for `username`/`year` is fetched from. Also the base of the cache key.
    fn source_url(&self, username: &str, year: i32) -> Result<String, ProgressError>;

    async fn fetch(&self, username: &str, year: i32) -> Result<String, ProgressError>;
}

/// Pulls the contribution count out of a raw document.
///
/// Kept separate from fetching so the matching rule can change with the
/// upstream page layout without touching the cache or the orchestrator.
pub trait CountExtractor: Send + Sync {
    fn extract(&self, raw: &str) -> Result<Extraction, ProgressError>;
}

/// Durable backing for the in-memory cache.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<CacheEntry>, ProgressError>;

    /// Overwrites any prior entry for the same key.
    async fn save(&self, entry: &CacheEntry) -> Result<(), ProgressError>;

    async fn count(&self) -> Result<usize, ProgressError>;
}
