//! The set of files whose output must be regenerated.

use indexmap::IndexSet;
use tracing::trace;

use crate::base::FileName;

/// Files marked for rebuild, in the order they were first marked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildSet {
    files: IndexSet<FileName>,
}

impl RebuildSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the file was newly marked.
    pub fn mark(&mut self, file: &FileName) -> bool {
        let added = self.files.insert(file.clone());
        if added {
            trace!(file = %file, "marked for rebuild");
        }
        added
    }

    pub fn mark_all<'a>(&mut self, files: impl IntoIterator<Item = &'a FileName>) {
        for file in files {
            self.mark(file);
        }
    }

    pub fn unmark(&mut self, file: &str) -> bool {
        self.files.shift_remove(file)
    }

    pub fn contains(&self, file: &str) -> bool {
        self.files.contains(file)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileName> {
        self.files.iter()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}
