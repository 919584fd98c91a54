//! Shadow state for the file currently being reparsed.

use indexmap::IndexMap;

use super::extension::ExtensionId;
use super::item::Definition;
use crate::base::{FileName, ItemString};

/// What the current parse of one file has claimed so far.
///
/// Unlike the main store, which keeps a file's first definition until the
/// watch is analyzed, this always reflects the latest parse.
#[derive(Debug, Clone)]
pub(super) struct WatchedFile {
    pub(super) file: FileName,
    definitions: Vec<IndexMap<ItemString, Definition>>,
}

impl WatchedFile {
    pub(super) fn new(file: FileName) -> Self {
        Self {
            file,
            definitions: Vec::new(),
        }
    }

    /// First definition per item wins, as in the main store.
    pub(super) fn add_definition(
        &mut self,
        extension: ExtensionId,
        item: ItemString,
        definition: Definition,
    ) {
        let index = extension.index();
        if self.definitions.len() <= index {
            self.definitions.resize_with(index + 1, IndexMap::new);
        }
        self.definitions[index].entry(item).or_insert(definition);
    }

    pub(super) fn definition(&self, extension: ExtensionId, item: &str) -> Option<&Definition> {
        self.definitions.get(extension.index())?.get(item)
    }
}
