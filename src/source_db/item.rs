//! Items and their per-file definitions.

use indexmap::IndexMap;

use crate::base::FileName;
use crate::language::TopicKind;

/// What one file says about an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    /// The file defines the item; nothing else is tracked.
    Exists,
    Symbol(SymbolDefinition),
}

/// Metadata compared between parses to detect changed symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDefinition {
    pub kind: TopicKind,
    pub prototype: Option<String>,
    pub summary: Option<String>,
}

/// One named entity within an extension.
///
/// The first remaining definition, in the order files added them, is the
/// authoritative one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    definitions: IndexMap<FileName, Definition>,
}

impl Item {
    pub fn has_definitions(&self) -> bool {
        !self.definitions.is_empty()
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn definition(&self, file: &str) -> Option<&Definition> {
        self.definitions.get(file)
    }

    pub fn has_definition(&self, file: &str) -> bool {
        self.definitions.contains_key(file)
    }

    /// The definition cross-references use.
    pub fn authoritative(&self) -> Option<(&FileName, &Definition)> {
        self.definitions.first()
    }

    /// The file's definition together with the stored file key.
    pub fn definition_entry(&self, file: &str) -> Option<(&FileName, &Definition)> {
        self.definitions.get_key_value(file)
    }

    pub fn defining_files(&self) -> impl Iterator<Item = &FileName> {
        self.definitions.keys()
    }

    /// Returns false if the file already had a definition, which is kept.
    pub(super) fn add_definition(&mut self, file: FileName, definition: Definition) -> bool {
        match self.definitions.entry(file) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(definition);
                true
            }
        }
    }

    /// Replace in place, keeping the file's position in the order.
    pub(super) fn change_definition(&mut self, file: &str, definition: Definition) -> bool {
        match self.definitions.get_mut(file) {
            Some(existing) => {
                *existing = definition;
                true
            }
            None => false,
        }
    }

    pub(super) fn delete_definition(&mut self, file: &str) -> Option<Definition> {
        self.definitions.shift_remove(file)
    }
}
