//! Error taxonomy shared by every stage of loading a forecast.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = WoozyError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum WoozyError {
    /// A feed timestamp did not match `YYYY-MM-DDTHH:MM:SS`.
    #[error("Invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    /// The forecast document itself could not be decoded.
    #[error("Failed to decode forecast document: {0}")]
    Decode(#[from] quick_xml::DeError),

    #[error("Failed to reach forecast provider: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Forecast provider answered with status {status}")]
    Remote { status: u16 },

    #[error("Failed to load forecast")]
    Load,

    #[error("Failed to write forecast cache {}: {source}", path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to access config file {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine home directory")]
    NoHomeDir,
}

impl WoozyError {
    /// Timestamp and document decode failures are both parse errors.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Timestamp { .. } | Self::Decode(_))
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigIo { .. } | Self::ConfigFormat { .. } | Self::NoHomeDir
        )
    }
}
