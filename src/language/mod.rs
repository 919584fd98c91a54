//! Language descriptors and topic vocabulary.
//!
//! The per-language syntax tables and the keyword list are data owned by the
//! surrounding tool; this module only defines the shapes the pipeline reads:
//!
//! - [`LanguageSpec`] - comment markers and prototype enders for one language
//! - [`TopicType`], [`TopicKind`] - what a topic documents, and whether it is a list
//! - [`TopicSynonyms`] - free-text header words mapped to topic kinds

mod spec;
mod synonyms;
mod topic_kind;

pub use spec::{LanguageSpec, PrototypeEnder};
pub use synonyms::{HeaderLine, TopicSynonyms};
pub use topic_kind::{ScopeRule, TopicKind, TopicType};
