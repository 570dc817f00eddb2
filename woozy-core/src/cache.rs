//! Single-file forecast cache.
//!
//! The cache holds the raw XML of the last successful fetch. There is one
//! artifact regardless of place; fetching a new place overwrites it.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::{
    error::{Result, WoozyError},
    model::ForecastDocument,
};

const CACHE_FILE_NAME: &str = "woozyforecast.xml";

#[derive(Debug, Clone)]
pub struct ForecastCache {
    path: PathBuf,
}

impl ForecastCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache under the system temporary directory.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join(CACHE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached document, `None` when there is no usable copy.
    ///
    /// `force_clear` removes the artifact without reading it. Unless
    /// `assume_valid` is set, a document whose next update is not in the
    /// future is treated as stale and removed.
    pub fn read(&self, force_clear: bool, assume_valid: bool) -> Option<ForecastDocument> {
        self.read_at(force_clear, assume_valid, Local::now())
    }

    pub fn read_at(
        &self,
        force_clear: bool,
        assume_valid: bool,
        now: DateTime<Local>,
    ) -> Option<ForecastDocument> {
        if force_clear {
            tracing::info!(path = %self.path.display(), "Clearing cache");
            self.remove();
            return None;
        }

        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No cached forecast");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read cached forecast");
                return None;
            }
        };

        let doc = match String::from_utf8(raw)
            .map_err(|e| e.to_string())
            .and_then(|xml| ForecastDocument::from_xml(&xml).map_err(|e| e.to_string()))
        {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cached forecast is unreadable");
                return None;
            }
        };

        if !assume_valid && doc.meta.is_stale(now) {
            tracing::debug!(next_update = %doc.meta.next_update, "Cached forecast is stale");
            self.remove();
            return None;
        }

        Some(doc)
    }

    /// Store the raw feed bytes verbatim, replacing any previous content.
    pub fn write(&self, raw: &[u8]) -> Result<()> {
        fs::write(&self.path, raw).map_err(|source| WoozyError::Cache {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), bytes = raw.len(), "Forecast cached");
        Ok(())
    }

    fn remove(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove cached forecast");
            }
        }
    }
}
