//! Symbol resolution on top of the [`SourceDb`](crate::source_db::SourceDb).
//!
//! Topic symbols live in a rich extension whose definitions carry kind,
//! prototype and summary. Links found in topic bodies live in an
//! existence-only extension keyed by scope and text. Each link has an
//! ordered list of candidate symbols (scope chain, then singular forms)
//! and targets the first one that is defined.
//!
//! When a symbol appears, disappears or changes, the files whose links are
//! affected are marked in the [`RebuildSet`](crate::source_db::RebuildSet).

mod resolve;
mod table;

pub use resolve::{candidates, reference_key, singular_forms, split_reference_key};
pub use table::{Reference, ReferenceTarget, SymbolTable};
