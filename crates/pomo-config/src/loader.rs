//! Configuration loading and persistence with atomic file operations.

use crate::schema::Config;
use crate::validator::ConfigValidator;
use pomo_common::{Locale, PomoError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding `translations.languages_dir`.
pub const ENV_LANGUAGES_DIR: &str = "POMO_LANGUAGES_DIR";

/// Environment variable overriding `translations.default_locale`.
pub const ENV_DEFAULT_LOCALE: &str = "POMO_DEFAULT_LOCALE";

/// On-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yml` / `.yaml`
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Ok(Self::Yaml)
            }
            _ => Err(PomoError::Config(format!(
                "Unsupported configuration file extension: {}",
                path.display()
            ))),
        }
    }
}

/// Configuration loader with atomic file operations.
#[derive(Debug)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this loader reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from file, applies environment overrides and
    /// validates the result.
    pub async fn load(&self) -> Result<Config> {
        let format = ConfigFormat::from_path(&self.path)?;
        debug!("Loading configuration from {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path).await?;
        let mut config = Self::parse(&content, format)?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        ConfigValidator::validate(&config)?;

        info!("Loaded configuration from {}", self.path.display());
        Ok(config)
    }

    /// Saves configuration to file atomically.
    pub async fn save(&self, config: &Config) -> Result<()> {
        let format = ConfigFormat::from_path(&self.path)?;
        let rendered = Self::render(config, format)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, rendered.as_bytes()))
            .await
            .map_err(|e| PomoError::Config(format!("Configuration save task failed: {e}")))??;

        info!("Saved configuration to {}", self.path.display());
        Ok(())
    }

    /// Parses configuration text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Config> {
        match format {
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| PomoError::Serialization(e.to_string()))
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| PomoError::Serialization(e.to_string()))
            }
        }
    }

    /// Renders configuration in the given format.
    pub fn render(config: &Config, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| PomoError::Serialization(e.to_string()))
            }
            ConfigFormat::Yaml => {
                serde_yaml::to_string(config).map_err(|e| PomoError::Serialization(e.to_string()))
            }
        }
    }
}

/// Applies `POMO_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(ENV_LANGUAGES_DIR) {
        debug!("Overriding languages_dir from {}", ENV_LANGUAGES_DIR);
        config.translations.languages_dir = PathBuf::from(dir);
    }

    if let Some(locale) = lookup(ENV_DEFAULT_LOCALE) {
        debug!("Overriding default_locale from {}", ENV_DEFAULT_LOCALE);
        config.translations.default_locale = Locale::new(locale);
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;
    file.persist(path).map_err(|e| PomoError::Io(e.error))?;
    Ok(())
}
