//! Unified error types for slidekit.
//!
//! This module provides a single error type for layout registry loading,
//! layout definition, slide composition and export.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
