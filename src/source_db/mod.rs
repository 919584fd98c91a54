//! SourceDb: the incremental item/definition database.
//!
//! Extensions register in a fixed order and store items keyed by opaque
//! strings. Each item maps defining files to definitions. A per-file index
//! answers what a file currently claims, and the watched-file protocol diffs
//! a file's previous parse against its current one.

mod extension;
mod file;
mod item;
mod rebuild;
mod store;
mod watched;

pub use extension::{DefinitionListener, ExtensionId, ExtensionKind, IgnoreChanges};
pub use file::FileItems;
pub use item::{Definition, Item, SymbolDefinition};
pub use rebuild::RebuildSet;
pub use store::SourceDb;
