use crate::{
    cache::ForecastCache,
    error::{Result, WoozyError},
    model::ForecastDocument,
    provider::{ForecastProvider, fill_cache},
};

/// Cache-first forecast loading.
#[derive(Debug)]
pub struct ForecastLoader {
    cache: ForecastCache,
    provider: Box<dyn ForecastProvider>,
}

impl ForecastLoader {
    pub fn new(cache: ForecastCache, provider: Box<dyn ForecastProvider>) -> Self {
        Self { cache, provider }
    }

    pub fn cache(&self) -> &ForecastCache {
        &self.cache
    }

    /// Return a forecast for `place`, fetching only when the cache has no
    /// fresh copy. A just-fetched document is trusted even if its next
    /// update time has already passed.
    pub async fn load(&self, place: &str, force_clear: bool) -> Result<ForecastDocument> {
        if let Some(doc) = self.cache.read(force_clear, false) {
            tracing::debug!("Using cached forecast");
            return Ok(doc);
        }

        tracing::info!(place, "Fetching forecast");
        fill_cache(self.provider.as_ref(), &self.cache, place).await?;

        self.cache.read(false, true).ok_or(WoozyError::Load)
    }
}
