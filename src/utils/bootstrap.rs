//! Bootstrap utilities for rochedo binaries.
//!
//! Shared initialization code: tracing, stores, and the storage mode.

#[cfg(feature = "sqlite")]
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{StorageMode, LOG_ENV_VAR};
use crate::storage::local::LocalCollections;
use crate::storage::Result;
#[cfg(feature = "sqlite")]
use crate::{config::Config, repository::ShopRepository, storage};

/// Initialize tracing with ROCHEDO_LOG environment variable.
///
/// Defaults to "info" level if ROCHEDO_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Effective mode: a persisted local-mode flag overrides the configured mode.
pub fn resolve_mode(configured: StorageMode, local: &LocalCollections) -> Result<StorageMode> {
    if local.mode_flag()? {
        return Ok(StorageMode::Local);
    }
    Ok(configured)
}

/// Open both stores and build the repository for the effective mode.
#[cfg(feature = "sqlite")]
pub async fn open_repository(config: &Config) -> Result<ShopRepository> {
    let local = storage::init_local(&config.storage)?;
    let primary = storage::init_primary(&config.storage).await?;
    let mode = resolve_mode(config.storage.mode, &local)?;
    info!(mode = %mode, "Storage mode resolved");

    Ok(ShopRepository::with_config(
        primary,
        local,
        mode,
        config.storage.local.rollback_on_failure,
    ))
}
