//! # Pomo Config
//!
//! Type-safe configuration for pomo.
//!
//! Configuration is read from TOML or YAML, overridden from `POMO_*`
//! environment variables, and validated before use. The fallback
//! `Plural-Forms` header must compile, so a catalog loader can always rely
//! on it. [`ConfigCache`] keeps the active snapshot and can reload it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
