//! Prelude module for date_range_picker crate.
//!
//! Re-exports the derive macros from derive_more used across the crate.

pub use derive_more::Display;
