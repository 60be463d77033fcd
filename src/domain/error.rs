use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("{0}")]
    Validation(String),

    #[error("User not found: {0}")]
    SubjectNotFound(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream responded with status {0}")]
    UpstreamStatus(u16),

    #[error("User profile html text not match.")]
    NoMatch,

    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProgressError {
    /// Network-level failure or an unexpected upstream status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UpstreamStatus(_))
    }

    /// Rejected before any upstream call was made.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
