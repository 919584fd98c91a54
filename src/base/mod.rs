//! Foundation types for the ndoc toolchain.
//!
//! This module provides fundamental types used throughout the pipeline:
//! - [`FileName`], [`ItemString`] - Shared string keys for files and items
//! - [`LineSpan`] - 1-based line ranges for comments and topics
//! - [`Settings`] - Pipeline configuration
//! - [`NdocError`], [`ContractViolation`] - Error taxonomy
//! - Domain constants (tab width, delineator titles, key separators)
//!
//! This module has NO dependencies on other ndoc modules.

pub mod constants;
mod error;
mod position;
mod settings;

use std::sync::Arc;

pub use error::{ContractViolation, NdocError, Result};
pub use position::LineSpan;
pub use settings::Settings;

// Re-export text-size types for convenience
pub use text_size;

/// Name of a source file as the rest of the project knows it.
///
/// Cheap to clone; every definition and reference record holds one.
pub type FileName = Arc<str>;

/// Opaque key identifying an item within one extension's namespace.
pub type ItemString = Arc<str>;
