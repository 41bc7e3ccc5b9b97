//! Cached plural-form selection for a single Plural-Forms expression

use crate::error::{PluralFormsError, PluralResult};
use crate::parser::parse;
use crate::program::Program;
use crate::token::tokenize;
use dashmap::DashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// A compiled Plural-Forms expression with a per-count result cache.
///
/// The expression is tokenized and parsed once, when the value is built;
/// every structural error surfaces there. [`PluralForms::get`] then runs the
/// compiled program at most once per distinct count. The cache only grows,
/// and is safe to share between threads.
///
/// ```
/// use pomo_plural::PluralForms;
///
/// let forms = PluralForms::new("n == 1 ? 0 : n % 10 >= 2 && n % 10 <= 4 ? 1 : 2")?;
/// assert_eq!(forms.get(1)?, 0);
/// assert_eq!(forms.get(23)?, 1);
/// assert_eq!(forms.get(25)?, 2);
/// # Ok::<(), pomo_plural::PluralFormsError>(())
/// ```
#[derive(Debug)]
pub struct PluralForms {
    expression: String,
    program: Program,
    cache: DashMap<i64, i64>,
    evaluations: AtomicUsize,
}

impl PluralForms {
    /// Compiles an expression such as `n != 1` or `(n > 1)`.
    pub fn new(expression: &str) -> PluralResult<Self> {
        let tokens = tokenize(expression)?;
        let program = parse(&tokens)?;
        debug!("Compiled plural expression '{}' to '{}'", expression, program);

        Ok(Self {
            expression: expression.to_string(),
            program,
            cache: DashMap::new(),
            evaluations: AtomicUsize::new(0),
        })
    }

    /// Returns the plural-form index for `n`, evaluating only on a cache miss.
    pub fn get(&self, n: i64) -> PluralResult<i64> {
        if let Some(hit) = self.cache.get(&n) {
            return Ok(*hit);
        }

        let value = self.cache.entry(n).or_try_insert_with(|| {
            self.evaluations.fetch_add(1, Ordering::Relaxed);
            self.program.evaluate(n)
        })?;
        Ok(*value)
    }

    /// The source expression this value was compiled from
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The compiled postfix program
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Number of distinct counts currently cached
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Number of times the program has actually been executed
    pub fn evaluation_count(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }
}

impl FromStr for PluralForms {
    type Err = PluralFormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for PluralForms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_caches_results() {
        let forms = PluralForms::new("n != 1").unwrap();
        assert_eq!(forms.evaluation_count(), 0);

        assert_eq!(forms.get(5), Ok(1));
        assert_eq!(forms.get(5), Ok(1));
        assert_eq!(forms.get(5), Ok(1));
        assert_eq!(forms.evaluation_count(), 1);
        assert_eq!(forms.cached_len(), 1);

        assert_eq!(forms.get(1), Ok(0));
        assert_eq!(forms.evaluation_count(), 2);
        assert_eq!(forms.cached_len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let forms = PluralForms::new("10 / n").unwrap();
        assert_eq!(forms.get(0), Err(PluralFormsError::DivisionByZero { n: 0 }));
        assert_eq!(forms.cached_len(), 0);
        assert_eq!(forms.get(5), Ok(2));
        assert_eq!(forms.cached_len(), 1);
    }

    #[test]
    fn test_from_str_and_display() {
        let forms: PluralForms = "n > 1".parse().unwrap();
        assert_eq!(forms.to_string(), "n > 1");
        assert_eq!(forms.expression(), "n > 1");
        assert_eq!(forms.program().to_string(), "n 1 >");
    }

    #[test]
    fn test_compile_errors_are_eager() {
        let err = PluralForms::new("n n").unwrap_err();
        assert_eq!(err, PluralFormsError::TooManyOperands);
        assert!(err.is_compile_error());

        let err = PluralForms::new("n ? 1").unwrap_err();
        assert!(err.is_compile_error());
    }

    #[test]
    fn test_shared_between_threads() {
        let forms = std::sync::Arc::new(PluralForms::new("n % 3").unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let forms = std::sync::Arc::clone(&forms);
                std::thread::spawn(move || (0..30).map(|n| forms.get(n).unwrap()).sum::<i64>())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 30);
        }
        assert_eq!(forms.cached_len(), 30);
        assert_eq!(forms.evaluation_count(), 30);
    }
}
