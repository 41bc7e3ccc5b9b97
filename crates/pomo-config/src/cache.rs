//! Validated configuration snapshots with lock-free reads.

use crate::loader::ConfigLoader;
use crate::schema::Config;
use crate::validator::ConfigValidator;
use arc_swap::ArcSwap;
use pomo_common::{PomoError, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Holds the active configuration.
///
/// Readers get an `Arc` snapshot that stays valid while a newer configuration
/// is swapped in. Every configuration stored here has passed
/// [`ConfigValidator::validate`].
#[derive(Debug)]
pub struct ConfigCache {
    current: ArcSwap<Config>,
    source: Option<ConfigLoader>,
}

impl ConfigCache {
    /// Wraps an in-memory configuration that has no backing file.
    pub fn new(config: Config) -> Result<Self> {
        ConfigValidator::validate(&config)?;
        Ok(Self {
            current: ArcSwap::from_pointee(config),
            source: None,
        })
    }

    /// Loads the configuration from `loader` and remembers it for [`Self::reload`].
    pub async fn open(loader: ConfigLoader) -> Result<Self> {
        let config = loader.load().await?;
        Ok(Self {
            current: ArcSwap::from_pointee(config),
            source: Some(loader),
        })
    }

    /// Current snapshot
    pub fn get(&self) -> Arc<Config> {
        self.current.load_full()
    }

    /// The file this cache reloads from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_ref().map(ConfigLoader::path)
    }

    /// Validates and installs `config`, returning the snapshot it replaced.
    pub fn update(&self, config: Config) -> Result<Arc<Config>> {
        ConfigValidator::validate(&config)?;
        Ok(self.current.swap(Arc::new(config)))
    }

    /// Re-reads the backing file. Returns `true` when the configuration changed.
    ///
    /// A file that fails to load or validate leaves the current snapshot in place.
    pub async fn reload(&self) -> Result<bool> {
        let loader = self.source.as_ref().ok_or_else(|| {
            PomoError::Config("Configuration has no backing file to reload".to_string())
        })?;

        let config = loader.load().await?;
        if *self.current.load_full() == config {
            return Ok(false);
        }

        self.current.store(Arc::new(config));
        info!("Reloaded configuration from {}", loader.path().display());
        Ok(true)
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self {
            current: ArcSwap::from_pointee(Config::default()),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_common::Locale;

    #[test]
    fn test_update_rejects_invalid() {
        let cache = ConfigCache::default();
        let mut config = Config::default();
        config.translations.fallback_plural_forms = "nplurals=2; plural=n +;".to_string();

        assert!(cache.update(config).is_err());
        assert_eq!(*cache.get(), Config::default());
    }

    #[test]
    fn test_update_returns_previous() {
        let cache = ConfigCache::default();
        let mut config = Config::default();
        config.translations.default_locale = Locale::new("pl_PL");

        let previous = cache.update(config).unwrap();
        assert_eq!(previous.translations.default_locale.as_str(), "en_US");
        assert_eq!(cache.get().translations.default_locale.as_str(), "pl_PL");
    }

    #[tokio::test]
    async fn test_reload_without_source() {
        let cache = ConfigCache::new(Config::default()).unwrap();
        assert!(cache.source().is_none());
        assert!(cache.reload().await.is_err());
    }
}
