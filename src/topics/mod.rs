//! Topics: the structured documentation entries extracted from comments.
//!
//! - [`TopicExtractor`] splits cleaned comments at header lines and tracks
//!   package and scope across the comments of a file
//! - [`AutoTopicMerger`] folds in topics derived from the language grammar
//!   and inserts package delineators

mod extractor;
mod merger;
mod topic;

pub use extractor::{ParseContext, TopicExtractor, default_title};
pub use merger::{AutoTopicMerger, add_package_delineators};
pub use topic::{AutoTopic, Topic, package_of, qualify, unqualified};
