//! # ndoc-base
//!
//! Core library for comment-driven documentation: source comments become
//! structured topics with NDMarkup bodies, and an incremental symbol store
//! decides which files must be regenerated when definitions change.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project          → Session, per-file pipeline
//!   ↓
//! symbols          → SymbolTable: symbols, links, scope-chain resolution
//! class_hierarchy  → parent/child edges between classes
//!   ↓
//! source_db        → item/definition store, watch protocol, rebuild set
//!   ↓
//! topics           → Topic model, TopicExtractor, AutoTopicMerger
//!   ↓
//! markup           → MarkupFormatter (block + inline), NDMarkup queries
//!   ↓
//! parser           → CommentScanner, prototype capture, CommentCleaner
//!   ↓
//! language         → LanguageSpec, TopicType/TopicKind, TopicSynonyms
//!   ↓
//! base             → FileName/ItemString, Settings, errors, constants
//! ```

// ============================================================================
// MODULES (dependency order: base → language → parser → markup → topics →
// source_db → symbols/class_hierarchy → project)
// ============================================================================

/// Foundation types: shared keys, settings, errors
pub mod base;

/// Language descriptors and topic kinds
pub mod language;

/// Comment scanning, prototype capture and comment cleaning
pub mod parser;

/// NDMarkup formatting and queries
pub mod markup;

/// Topics: extraction from comments and merging with auto-topics
pub mod topics;

/// Incremental item/definition database
pub mod source_db;

/// Symbol and reference resolution
pub mod symbols;

/// Class inheritance tracking
pub mod class_hierarchy;

/// Session and pipeline
pub mod project;

// Re-export foundation types
pub use base::{ContractViolation, FileName, ItemString, NdocError, Result, Settings};

// Re-export the main entry points
pub use language::{LanguageSpec, TopicKind, TopicSynonyms, TopicType};
pub use markup::{MarkupFormatter, format_body};
pub use parser::{CommentCleaner, CommentScanner, RawComment};
pub use project::{ParsedFile, Session, SourceFile};
pub use source_db::{RebuildSet, SourceDb};
pub use topics::{AutoTopic, AutoTopicMerger, Topic, TopicExtractor};
