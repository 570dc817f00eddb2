use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use std::fmt::Debug;

use crate::{
    cache::ForecastCache,
    error::{Result, WoozyError},
};

pub const YR_BASE_URL: &str = "http://www.yr.no";
pub const USER_AGENT: &str = "woozy, https://github.com/gummiboll/woozy";

/// Source of raw forecast feeds.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the raw XML feed for `place`.
    async fn fetch(&self, place: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct YrProvider {
    base_url: String,
    http: Client,
}

impl YrProvider {
    pub fn new() -> Self {
        Self::with_base_url(YR_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// `<base>/place/<place>/forecast.xml`
    pub fn forecast_url(&self, place: &str) -> String {
        format!("{}/place/{}/forecast.xml", self.base_url, place)
    }
}

impl Default for YrProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastProvider for YrProvider {
    async fn fetch(&self, place: &str) -> Result<Vec<u8>> {
        let url = self.forecast_url(place);
        tracing::debug!(%url, "Requesting forecast");

        let res = self
            .http
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            tracing::warn!(%url, %status, "Forecast request failed");
            return Err(WoozyError::Remote {
                status: status.as_u16(),
            });
        }

        let body = res.bytes().await?;
        tracing::debug!(bytes = body.len(), "Forecast received");
        Ok(body.to_vec())
    }
}

/// Fetch the feed for `place` and store it in `cache`.
///
/// The cache is only written after a complete 200 response.
pub async fn fill_cache(
    provider: &dyn ForecastProvider,
    cache: &ForecastCache,
    place: &str,
) -> Result<()> {
    let raw = provider.fetch(place).await?;
    cache.write(&raw)
}
