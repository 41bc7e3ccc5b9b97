//! Shared compiled plural rules

use dashmap::DashMap;
use pomo_plural::{PluralForms, PluralResult};
use std::sync::Arc;
use tracing::debug;

/// Compiles each distinct plural expression once and hands out shared copies.
///
/// Catalogs of the same language usually carry identical rules, so sharing
/// also shares the per-count result cache. The registry is an ordinary value
/// owned by whoever loads catalogs.
#[derive(Debug, Default)]
pub struct PluralFormsRegistry {
    compiled: DashMap<String, Arc<PluralForms>>,
}

impl PluralFormsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled rule for `expression`, compiling it on first use.
    ///
    /// Compile errors are returned and nothing is stored.
    pub fn get_or_compile(&self, expression: &str) -> PluralResult<Arc<PluralForms>> {
        let expression = expression.trim();
        if let Some(forms) = self.compiled.get(expression) {
            return Ok(Arc::clone(&forms));
        }

        let forms = self
            .compiled
            .entry(expression.to_string())
            .or_try_insert_with(|| {
                debug!("Registering plural expression '{}'", expression);
                PluralForms::new(expression).map(Arc::new)
            })?;
        Ok(Arc::clone(&forms))
    }

    /// Number of distinct expressions compiled so far
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Whether nothing has been compiled yet
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
