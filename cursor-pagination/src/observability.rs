//! Tracing setup
//!
//! The library only emits `tracing` events. Binaries that want them on stdout
//! can call [`init_tracing`] once at startup.

use tracing_subscriber::EnvFilter;

use crate::{config::PaginatorConfig, error::Result};

/// Install a JSON `tracing` subscriber filtered by `config.log_level`
///
/// An unparseable level falls back to `info`. Calling this when a global
/// subscriber is already installed leaves the existing one in place.
pub fn init_tracing(config: &PaginatorConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global tracing subscriber already installed");
        return Ok(());
    }

    tracing::info!(
        delimiter = %config.delimiter,
        max_page_size = config.max_page_size,
        "Tracing initialized for cursor pagination"
    );

    Ok(())
}
