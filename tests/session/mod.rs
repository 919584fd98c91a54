//! Session tests
//!
//! Incremental behavior across files: rebuild marking after renames,
//! link retargeting, class hierarchy edges, file removal and I/O errors.

pub mod tests_hierarchy;
pub mod tests_io;
pub mod tests_rebuild;
