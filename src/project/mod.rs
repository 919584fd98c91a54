//! Project-level orchestration.
//!
//! [`pipeline`] turns one source file into topics without touching shared
//! state, so a batch can be parsed on the rayon pool. [`Session`] owns the
//! [`SourceDb`](crate::source_db::SourceDb) and its extensions and commits
//! parsed files one at a time through the watch protocol.

pub mod pipeline;
mod session;

pub use pipeline::{ParsedFile, SourceFile, parse_source, parse_sources};
pub use session::Session;
