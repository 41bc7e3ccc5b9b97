//! # Pomo Plural
//!
//! Compiler and evaluator for gettext `Plural-Forms` expressions.
//!
//! The expression after `plural=` in a catalog header is a small C-like
//! language over the free variable `n`. This crate turns it into a postfix
//! program once and evaluates it for counts on demand:
//!
//! - [`token`] splits the source into tokens
//! - [`parser`] applies operator precedence and emits a [`Program`]
//! - [`program`] runs the stack machine
//! - [`PluralForms`] ties them together and caches results per count
//! - [`PluralFormsHeader`] reads the `nplurals=N; plural=EXPR;` header value
//!
//! # Example
//!
//! ```rust
//! use pomo_plural::PluralForms;
//!
//! let forms = PluralForms::new("n > 1 ? 1 : 0")?;
//! assert_eq!(forms.get(0)?, 0);
//! assert_eq!(forms.get(2)?, 1);
//! # Ok::<(), pomo_plural::PluralFormsError>(())
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod header;
pub mod parser;
pub mod plural_forms;
pub mod program;
pub mod token;

pub use error::{ErrorKind, PluralFormsError, PluralResult};
pub use header::PluralFormsHeader;
pub use parser::parse;
pub use plural_forms::PluralForms;
pub use program::{BinaryOperator, Instruction, Program};
pub use token::{tokenize, Operator, Token};
