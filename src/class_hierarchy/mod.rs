//! Inheritance edges between classes, kept consistent with the files that
//! declare them.
//!
//! Two existence-only [`SourceDb`](crate::source_db::SourceDb) extensions
//! back the hierarchy: one for class definitions, one for `class → parent`
//! edges. The in-memory graph holds both directions; only the parent
//! direction is definition-tracked.

mod hierarchy;

pub use hierarchy::{Class, ClassHierarchy, edge_key, split_edge_key};
