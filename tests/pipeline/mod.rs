//! Comment-to-topic pipeline tests
//!
//! - Comment cleaning properties (idempotence, box stripping)
//! - Header detection and scope propagation
//! - NDMarkup produced for whole files

pub mod tests_cleaning;
pub mod tests_topics;
