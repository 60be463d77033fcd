use crate::domain::error::ProgressError;
use serde::{Deserialize, Serialize};

pub const MISSING_PARAMS: &str = "Query params username, year, target is required.";

// 请求参数，原样来自 query string / CLI
#[derive(Debug, Clone, Default)]
pub struct RawQuery {
    pub username: Option<String>,
    pub year: Option<String>,
    pub target: Option<String>,
}

impl RawQuery {
    pub fn new(username: &str, year: &str, target: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            year: Some(year.to_string()),
            target: Some(target.to_string()),
        }
    }
}

// 校验后的查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub username: String,
    pub year: i32,
    pub target: i64,
}

impl Query {
    /// Validate raw parameters. Blank values count as missing.
    pub fn parse(raw: &RawQuery) -> Result<Self, ProgressError> {
        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let (Some(username), Some(year), Some(target)) = (
            present(&raw.username),
            present(&raw.year),
            present(&raw.target),
        ) else {
            return Err(ProgressError::Validation(MISSING_PARAMS.to_string()));
        };

        let year = year.parse::<i32>().map_err(|_| {
            ProgressError::Validation(format!("Query param year must be an integer: {}", year))
        })?;

        let target = match target.parse::<i64>() {
            Ok(t) if t > 0 => t,
            _ => {
                return Err(ProgressError::Validation(format!(
                    "Query param target must be a positive integer: {}",
                    target
                )))
            }
        };

        Ok(Self {
            username,
            year,
            target,
        })
    }
}

// 缓存条目，timestamp 为 Unix 毫秒
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub timestamp: i64,
    pub count: u64,
}

impl CacheEntry {
    pub fn new(key: String, count: u64) -> Self {
        Self {
            key,
            timestamp: chrono::Utc::now().timestamp_millis(),
            count,
        }
    }

    pub fn is_fresh(&self, ttl_ms: i64, now_ms: i64) -> bool {
        now_ms - self.timestamp < ttl_ms
    }
}

// 提取结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction {
    pub count: u64,
    pub year: Option<i32>,
}

// 查询结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Progress {
    pub username: String,
    pub year: i32,
    pub target: i64,
    pub count: u64,
    pub percentage: i64,
    pub source: ProgressSource,
}

// 数据来源
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressSource {
    MemoryCache,
    PersistentCache,
    Online,
}
