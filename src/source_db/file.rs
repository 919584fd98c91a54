//! Per-file index of the items a file defines.

use indexmap::IndexSet;

use super::extension::ExtensionId;
use crate::base::ItemString;

/// Which items each extension records for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileItems {
    by_extension: Vec<IndexSet<ItemString>>,
}

impl FileItems {
    pub fn items(&self, extension: ExtensionId) -> impl Iterator<Item = &ItemString> {
        self.by_extension
            .get(extension.index())
            .into_iter()
            .flat_map(|items| items.iter())
    }

    pub fn has_item(&self, extension: ExtensionId, item: &str) -> bool {
        self.by_extension
            .get(extension.index())
            .is_some_and(|items| items.contains(item))
    }

    pub fn is_empty(&self) -> bool {
        self.by_extension.iter().all(IndexSet::is_empty)
    }

    pub(super) fn add_item(&mut self, extension: ExtensionId, item: ItemString) -> bool {
        let index = extension.index();
        if self.by_extension.len() <= index {
            self.by_extension.resize_with(index + 1, IndexSet::new);
        }
        self.by_extension[index].insert(item)
    }

    pub(super) fn delete_item(&mut self, extension: ExtensionId, item: &str) -> bool {
        self.by_extension
            .get_mut(extension.index())
            .is_some_and(|items| items.shift_remove(item))
    }
}
