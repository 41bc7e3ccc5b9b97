//! Async loading of catalogs from the languages directory

use crate::error::{TranslationsError, TranslationsResult};
use crate::registry::PluralFormsRegistry;
use crate::translations::{PluralFormsPolicy, Translations};
use crate::{mo, po};
use pomo_common::{Locale, TextDomain};
use pomo_config::{Config, ConfigValidator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Catalog file formats, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// Text `.po`
    Po,
    /// Binary `.mo`
    Mo,
}

impl CatalogFormat {
    /// Formats tried by [`TranslationLoader::load_locale`], in order
    pub const PREFERENCE: [Self; 2] = [Self::Mo, Self::Po];

    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> TranslationsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("po") => Ok(Self::Po),
            Some(ext) if ext.eq_ignore_ascii_case("mo") => Ok(Self::Mo),
            _ => Err(TranslationsError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            Self::Po => "po",
            Self::Mo => "mo",
        }
    }
}

/// Loads catalogs for a text domain.
///
/// Every catalog it produces compiles plural rules through the loader's
/// registry, so locales sharing a rule share its compiled form.
#[derive(Debug, Clone)]
pub struct TranslationLoader {
    languages_dir: PathBuf,
    text_domain: TextDomain,
    policy: PluralFormsPolicy,
    registry: Arc<PluralFormsRegistry>,
}

impl TranslationLoader {
    /// Creates a loader with the default fallback policy.
    pub fn new<P: AsRef<Path>>(languages_dir: P, text_domain: TextDomain) -> Self {
        Self {
            languages_dir: languages_dir.as_ref().to_path_buf(),
            text_domain,
            policy: PluralFormsPolicy::default(),
            registry: Arc::new(PluralFormsRegistry::new()),
        }
    }

    /// Creates a loader from the `translations` section of the configuration.
    pub fn from_config(config: &Config) -> TranslationsResult<Self> {
        let settings = &config.translations;
        let policy = if settings.strict_plural_forms {
            PluralFormsPolicy::Strict
        } else {
            PluralFormsPolicy::Fallback(ConfigValidator::fallback_plural_forms(config)?)
        };

        Ok(Self::new(&settings.languages_dir, settings.text_domain.clone()).with_policy(policy))
    }

    /// Replaces the plural-forms policy.
    #[must_use]
    pub fn with_policy(mut self, policy: PluralFormsPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The registry shared by every catalog this loader creates
    pub fn registry(&self) -> &Arc<PluralFormsRegistry> {
        &self.registry
    }

    /// The directory catalogs are looked up in
    pub fn languages_dir(&self) -> &Path {
        &self.languages_dir
    }

    /// An empty catalog wired to this loader's registry and policy.
    pub fn new_catalog(&self) -> Translations {
        Translations::with_registry(Arc::clone(&self.registry), self.policy.clone())
    }

    /// Path of the catalog for `locale` in `format`.
    ///
    /// The `default` domain uses `<locale>.<ext>`, other domains use
    /// `<domain>-<locale>.<ext>`.
    pub fn catalog_path(&self, locale: &Locale, format: CatalogFormat) -> PathBuf {
        let stem = if self.text_domain == TextDomain::default() {
            locale.to_string()
        } else {
            format!("{}-{}", self.text_domain, locale)
        };
        self.languages_dir
            .join(format!("{stem}.{}", format.extension()))
    }

    /// Loads a single `.po` or `.mo` file.
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> TranslationsResult<Translations> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path)?;
        debug!("Loading {:?} catalog: {:?}", format, path);

        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TranslationsError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                TranslationsError::IoError(e)
            }
        })?;

        let mut translations = self.new_catalog();
        match format {
            CatalogFormat::Mo => mo::read_into(&data, &mut translations)?,
            CatalogFormat::Po => {
                let content = std::str::from_utf8(&data)
                    .map_err(|_| TranslationsError::InvalidUtf8 { what: "PO file" })?;
                po::read_into(content, &mut translations)?;
            }
        }

        info!(
            "Loaded {} entries from {:?} ({} plural forms)",
            translations.len(),
            path,
            translations.get_plural_forms_count()
        );
        Ok(translations)
    }

    /// Loads the catalog for `locale`, preferring `.mo` over `.po`.
    pub async fn load_locale(&self, locale: &Locale) -> TranslationsResult<Translations> {
        for format in CatalogFormat::PREFERENCE {
            let path = self.catalog_path(locale, format);
            match self.load_file(&path).await {
                Err(TranslationsError::NotFound { .. }) => {
                    debug!("No catalog at {:?}", path);
                }
                result => return result,
            }
        }

        let stem = self.catalog_path(locale, CatalogFormat::Mo).with_extension("");
        Err(TranslationsError::NotFound {
            path: format!("{}.{{mo,po}}", stem.display()),
        })
    }
}
