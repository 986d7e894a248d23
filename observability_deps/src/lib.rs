//! Single source of truth for the tracing ecosystem used by this
//! workspace.
//!
//! Crates log by importing the macros through this re-export rather than
//! depending on `tracing` directly, so the version is pinned in exactly
//! one place.

#![warn(missing_docs)]

pub use tracing;
