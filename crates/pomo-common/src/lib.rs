//! # Pomo Common
//!
//! Shared types, utilities, and common functionality for pomo.
//!
//! This crate provides the foundational types used across the other crates in
//! the workspace: the application-wide error type, locale and text-domain
//! newtypes, and charset canonicalization.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
