//! # pomo
//!
//! Command line front end for the pomo crates: evaluate Plural-Forms
//! expressions, inspect PO and MO catalogs and look up translations.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use cli::*;
pub use commands::*;
pub use error::*;
pub use logging::*;
