use crate::domain::error::ProgressError;
use crate::domain::traits::ProfileFetcher;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// Fetches the contributions fragment of a GitHub profile page.
pub struct GithubFetcher {
    client: Client,
    base_url: Url,
}

impl GithubFetcher {
    pub fn new(client: Client, base_url: &str) -> Result<Self, ProgressError> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    fn profile_url(&self, username: &str, year: i32) -> Result<Url, ProgressError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ProgressError::Config(format!("Upstream base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(username);
        url.query_pairs_mut()
            .append_pair("tab", "overview")
            .append_pair("from", &format!("{}-01-01", year))
            .append_pair("to", &format!("{}-12-31", year));
        Ok(url)
    }
}

#[async_trait]
impl ProfileFetcher for GithubFetcher {
    fn source_url(&self, username: &str, year: i32) -> Result<String, ProgressError> {
        Ok(self.profile_url(username, year)?.to_string())
    }

    async fn fetch(&self, username: &str, year: i32) -> Result<String, ProgressError> {
        let url = self.profile_url(username, year)?;
        tracing::info!(%url, "fetching profile");

        // Without this header the page ships the script-driven layout and the count is missing
        let response = self
            .client
            .get(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ProgressError::SubjectNotFound(username.to_string())),
            status if !status.is_success() => Err(ProgressError::UpstreamStatus(status.as_u16())),
            _ => Ok(response.text().await?),
        }
    }
}
