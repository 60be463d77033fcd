use crate::domain::error::ProgressError;
use crate::domain::model::{CacheEntry, Progress, ProgressSource, Query, RawQuery};
use crate::domain::progress::percentage;
use crate::domain::traits::{CountExtractor, ProfileFetcher, ProgressStore};
use crate::infrastructure::storage::cache::MemoryCache;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    /// Skip cache reads and writes
    pub no_cache: bool,
}

/// Validate → cache lookup → fetch → extract → cache write.
pub struct ProgressService {
    fetcher: Arc<dyn ProfileFetcher>,
    extractor: Arc<dyn CountExtractor>,
    cache: Arc<MemoryCache>,
    store: Option<Arc<dyn ProgressStore>>,
    // per-key locks for concurrent cold misses
    inflight: Option<DashMap<String, Arc<Mutex<()>>>>,
}

impl ProgressService {
    pub fn new(
        fetcher: Arc<dyn ProfileFetcher>,
        extractor: Arc<dyn CountExtractor>,
        cache: Arc<MemoryCache>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            cache,
            store: None,
            inflight: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn ProgressStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.inflight = enabled.then(DashMap::new);
        self
    }

    pub fn cache(&self) -> &MemoryCache {
        &self.cache
    }

    /// Keys with a request currently fetching or queued.
    pub fn inflight_len(&self) -> usize {
        self.inflight.as_ref().map_or(0, DashMap::len)
    }

    pub fn store(&self) -> Option<&Arc<dyn ProgressStore>> {
        self.store.as_ref()
    }

    /// Cache key: source URL suffixed with the target.
    pub fn cache_key(&self, query: &Query) -> Result<String, ProgressError> {
        let url = self.fetcher.source_url(&query.username, query.year)?;
        Ok(format!("{}&target={}", url, query.target))
    }

    pub async fn query_progress(
        &self,
        raw: &RawQuery,
        options: QueryOptions,
    ) -> Result<Progress, ProgressError> {
        let query = Query::parse(raw)?;
        self.query(&query, options).await
    }

    pub async fn query(
        &self,
        query: &Query,
        options: QueryOptions,
    ) -> Result<Progress, ProgressError> {
        if options.no_cache {
            let count = self.fetch_count(query).await?;
            return Ok(to_progress(query, count, ProgressSource::Online));
        }

        let key = self.cache_key(query)?;

        if let Some((entry, source)) = self.lookup(&key).await {
            return Ok(to_progress(query, entry.count, source));
        }

        let Some(inflight) = &self.inflight else {
            return self.refresh(query, &key).await;
        };

        let flight = Flight::join(inflight, &key);
        let _held = flight.lock.lock().await;
        // whoever held the lock before us may have filled the cache
        let result = match self.cache.get_fresh(&key) {
            Some(entry) => {
                tracing::debug!(%key, "filled by concurrent request");
                Ok(to_progress(query, entry.count, ProgressSource::MemoryCache))
            }
            None => self.refresh(query, &key).await,
        };
        result
    }

    async fn lookup(&self, key: &str) -> Option<(CacheEntry, ProgressSource)> {
        // 1. Memory Cache
        if let Some(entry) = self.cache.get_fresh(key) {
            tracing::debug!(%key, "memory cache hit");
            return Some((entry, ProgressSource::MemoryCache));
        }

        // 2. Persistent Cache
        let store = self.store.as_ref()?;
        match store.load(key).await {
            Ok(Some(entry))
                if entry.is_fresh(self.cache.ttl_ms(), Utc::now().timestamp_millis()) =>
            {
                tracing::debug!(%key, "persistent cache hit");
                // keep the stored timestamp so the entry expires on schedule
                self.cache.insert(entry.clone());
                Some((entry, ProgressSource::PersistentCache))
            }
            Ok(_) => {
                tracing::debug!(%key, "cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "persistent cache read failed");
                None
            }
        }
    }

    /// Fetch, extract and write back. Nothing is cached on failure.
    async fn refresh(&self, query: &Query, key: &str) -> Result<Progress, ProgressError> {
        let count = self.fetch_count(query).await?;

        let entry = self.cache.put(key, count);
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&entry).await {
                tracing::warn!(%key, error = %e, "persistent cache write failed");
            }
        }

        Ok(to_progress(query, count, ProgressSource::Online))
    }

    async fn fetch_count(&self, query: &Query) -> Result<u64, ProgressError> {
        let raw = self.fetcher.fetch(&query.username, query.year).await?;
        let extraction = self.extractor.extract(&raw)?;

        if let Some(year) = extraction.year.filter(|y| *y != query.year) {
            tracing::warn!(
                username = %query.username,
                requested = query.year,
                matched = year,
                "contribution year differs from requested year"
            );
        }

        Ok(extraction.count)
    }
}

/// Membership in the per-key lock map. The entry is removed when the last
/// participant leaves, including when a request future is dropped mid-flight.
struct Flight<'a> {
    map: &'a DashMap<String, Arc<Mutex<()>>>,
    key: String,
    lock: Arc<Mutex<()>>,
}

impl<'a> Flight<'a> {
    fn join(map: &'a DashMap<String, Arc<Mutex<()>>>, key: &str) -> Self {
        let lock = map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        Self {
            map,
            key: key.to_string(),
            lock,
        }
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        // one reference in the map, one here; any more means someone is still queued
        self.map.remove_if(&self.key, |_, lock| {
            Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) <= 2
        });
    }
}

fn to_progress(query: &Query, count: u64, source: ProgressSource) -> Progress {
    Progress {
        username: query.username.clone(),
        year: query.year,
        target: query.target,
        count,
        // target > 0 after validation, so this is finite
        percentage: percentage(count, query.target) as i64,
        source,
    }
}
