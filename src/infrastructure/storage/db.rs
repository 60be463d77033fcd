use crate::domain::error::ProgressError;
use crate::domain::model::CacheEntry;
use crate::domain::traits::ProgressStore;
use async_trait::async_trait;
use std::path::Path;
use tokio_rusqlite::{params, Connection};

/// Open (creating if needed) the cache database and its parent directory.
pub async fn init_database(db_path: &Path) -> Result<Connection, ProgressError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let db = Connection::open(db_path.to_path_buf()).await?;
    create_schema(&db).await?;
    Ok(db)
}

async fn create_schema(db: &Connection) -> Result<(), ProgressError> {
    db.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS progress_cache (
                key TEXT PRIMARY KEY,
                count INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok::<_, rusqlite::Error>(())
    })
    .await?;

    Ok(())
}

/// SQLite-backed progress store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub async fn open(db_path: &Path) -> Result<Self, ProgressError> {
        Ok(Self::new(init_database(db_path).await?))
    }

    pub async fn open_in_memory() -> Result<Self, ProgressError> {
        let conn = Connection::open_in_memory().await?;
        create_schema(&conn).await?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl ProgressStore for SqliteStore {
    async fn load(&self, key: &str) -> Result<Option<CacheEntry>, ProgressError> {
        use rusqlite::OptionalExtension;

        let key = key.to_string();
        let entry = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT key, count, updated_at FROM progress_cache WHERE key = ?",
                    params![key],
                    |row| {
                        let count: i64 = row.get(1)?;
                        Ok(CacheEntry {
                            key: row.get(0)?,
                            count: count.max(0) as u64,
                            timestamp: row.get(2)?,
                        })
                    },
                )
                .optional()
            })
            .await?;

        Ok(entry)
    }

    async fn save(&self, entry: &CacheEntry) -> Result<(), ProgressError> {
        let key = entry.key.clone();
        let count = i64::try_from(entry.count).unwrap_or(i64::MAX);
        let updated_at = entry.timestamp;

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO progress_cache (key, count, updated_at) VALUES (?, ?, ?)",
                    params![key, count, updated_at],
                )
            })
            .await?;

        Ok(())
    }

    async fn count(&self) -> Result<usize, ProgressError> {
        let count: i64 = self
            .conn
            .call(|conn| {
                conn.query_row("SELECT COUNT(*) FROM progress_cache", params![], |row| {
                    row.get(0)
                })
            })
            .await?;

        Ok(count as usize)
    }
}
