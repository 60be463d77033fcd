use crate::application::progress::ProgressService;
use crate::domain::error::ProgressError;
use crate::domain::extract::ContributionsPattern;
use crate::infrastructure::config::{get_database_path, Config};
use crate::infrastructure::network::client::GithubFetcher;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::storage::cache::MemoryCache;
use crate::infrastructure::storage::db::SqliteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProgressService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(service: ProgressService, config: Config) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }

    /// Wire the production pipeline: GitHub fetcher, pattern extractor, memory cache and,
    /// when `cache.persist` is set and the file opens, the SQLite store.
    pub async fn from_config(config: Config) -> Result<Self, ProgressError> {
        let http_client = create_client(&config.upstream)?;
        let fetcher = GithubFetcher::new(http_client, &config.upstream.base_url)?;
        let cache = MemoryCache::new(config.cache.ttl(), config.cache.max_entries);

        let mut service = ProgressService::new(
            Arc::new(fetcher),
            Arc::new(ContributionsPattern),
            Arc::new(cache),
        )
        .with_single_flight(config.cache.single_flight);

        if config.cache.persist {
            let db_path = get_database_path(&config);
            match SqliteStore::open(&db_path).await {
                Ok(store) => {
                    tracing::debug!(path = %db_path.display(), "persistent cache opened");
                    service = service.with_store(Arc::new(store));
                }
                Err(e) => {
                    tracing::warn!(
                        path = %db_path.display(),
                        error = %e,
                        "persistent cache unavailable, running memory-only"
                    );
                }
            }
        }

        Ok(Self::new(service, config))
    }
}
