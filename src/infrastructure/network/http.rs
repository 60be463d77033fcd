// HTTP client utilities
use crate::domain::error::ProgressError;
use crate::infrastructure::config::Upstream;
use reqwest::Client;
use std::time::Duration;

/// Shared upstream client. The timeout keeps an unresponsive upstream from stalling requests.
pub fn create_client(upstream: &Upstream) -> Result<Client, ProgressError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(upstream.timeout_secs))
        .user_agent(upstream.user_agent.as_str());

    if let Some(proxy) = upstream.http_proxy.as_deref().filter(|p| !p.is_empty()) {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}
