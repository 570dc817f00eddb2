//! Core library for the `woozy` CLI.
//!
//! This crate defines:
//! - Configuration loading and first-run bootstrap
//! - The yr.no forecast document model and its timestamp decoding
//! - The on-disk forecast cache and the provider that fills it
//! - Cache-first loading of a forecast for a place
//!
//! It is used by `woozy-cli`, but can also be reused by other binaries.

pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod provider;
pub mod timefmt;

pub use cache::ForecastCache;
pub use config::{ConfigStatus, Configuration};
pub use error::{Result, WoozyError};
pub use loader::ForecastLoader;
pub use model::{ForecastDocument, ForecastEntry};
pub use provider::{ForecastProvider, YrProvider};
