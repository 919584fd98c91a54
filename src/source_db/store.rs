//! The item/definition database and the watched-file protocol.

use indexmap::IndexMap;
use tracing::{debug, error, trace};

use super::extension::{DefinitionListener, ExtensionId, ExtensionInfo, ExtensionKind};
use super::file::FileItems;
use super::item::{Definition, Item};
use super::watched::WatchedFile;
use crate::base::{ContractViolation, FileName, ItemString, NdocError, Result};

/// Log and wrap a broken contract.
fn violation(violation: ContractViolation) -> NdocError {
    error!(%violation, "source database contract violation");
    NdocError::Contract(violation)
}

/// Generic incremental store of items, their definitions per file, and the
/// files that define them.
///
/// A reparse only ever adds. Removals and modifications are found by
/// bracketing the reparse with [`watch_file_for_changes`] and
/// [`analyze_watched_file_changes`].
///
/// [`watch_file_for_changes`]: SourceDb::watch_file_for_changes
/// [`analyze_watched_file_changes`]: SourceDb::analyze_watched_file_changes
#[derive(Debug, Default)]
pub struct SourceDb {
    extensions: Vec<ExtensionInfo>,
    /// Items per extension, indexed by `ExtensionId`.
    items: Vec<IndexMap<ItemString, Item>>,
    files: IndexMap<FileName, FileItems>,
    watched: Option<WatchedFile>,
}

impl SourceDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // EXTENSIONS
    // ========================================================================

    /// Register an extension. Existence-only extensions store
    /// [`Definition::Exists`] regardless of what they add.
    pub fn register_extension(
        &mut self,
        kind: ExtensionKind,
        uses_definition_objects: bool,
    ) -> ExtensionId {
        let id = ExtensionId(self.extensions.len());
        self.extensions.push(ExtensionInfo {
            kind,
            uses_definition_objects,
        });
        self.items.push(IndexMap::new());
        debug!(extension = kind.name(), id = id.index(), "registered extension");
        id
    }

    /// The order additions are best applied in.
    pub fn registration_order(&self) -> impl DoubleEndedIterator<Item = ExtensionId> + use<> {
        (0..self.extensions.len()).map(ExtensionId)
    }

    /// The order changes and deletions are processed in.
    pub fn reverse_order(&self) -> impl Iterator<Item = ExtensionId> + use<> {
        self.registration_order().rev()
    }

    pub fn extension_kind(&self, extension: ExtensionId) -> ExtensionKind {
        self.extensions[extension.index()].kind
    }

    pub fn uses_definition_objects(&self, extension: ExtensionId) -> bool {
        self.extensions[extension.index()].uses_definition_objects
    }

    fn extension_name(&self, extension: ExtensionId) -> &'static str {
        self.extension_kind(extension).name()
    }

    // ========================================================================
    // ITEMS
    // ========================================================================

    /// Register a blank item. Returns whether it was new.
    pub fn add_item(&mut self, extension: ExtensionId, item: &str) -> Result<bool> {
        let name = self.extension_name(extension);
        let items = &mut self.items[extension.index()];
        match items.get(item) {
            Some(existing) if existing.has_definitions() => {
                Err(violation(ContractViolation::AddedDefinedItem {
                    extension: name,
                    item: item.to_string(),
                }))
            }
            Some(_) => Ok(false),
            None => {
                items.insert(ItemString::from(item), Item::default());
                Ok(true)
            }
        }
    }

    /// Register the item unless it already exists, defined or not.
    pub fn ensure_item(&mut self, extension: ExtensionId, item: &str) -> bool {
        let items = &mut self.items[extension.index()];
        if items.contains_key(item) {
            return false;
        }
        items.insert(ItemString::from(item), Item::default());
        true
    }

    pub fn item(&self, extension: ExtensionId, item: &str) -> Option<&Item> {
        self.items[extension.index()].get(item)
    }

    pub fn has_item(&self, extension: ExtensionId, item: &str) -> bool {
        self.items[extension.index()].contains_key(item)
    }

    /// All items of an extension, in insertion order.
    pub fn items(&self, extension: ExtensionId) -> impl Iterator<Item = (&ItemString, &Item)> {
        self.items[extension.index()].iter()
    }

    /// Remove an item that no longer has definitions. Returns whether it existed.
    pub fn delete_item(&mut self, extension: ExtensionId, item: &str) -> Result<bool> {
        let name = self.extension_name(extension);
        let items = &mut self.items[extension.index()];
        match items.get(item) {
            Some(existing) if existing.has_definitions() => {
                Err(violation(ContractViolation::DeletedDefinedItem {
                    extension: name,
                    item: item.to_string(),
                }))
            }
            Some(_) => {
                items.shift_remove(item);
                trace!(extension = name, item, "deleted item");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========================================================================
    // DEFINITIONS
    // ========================================================================

    /// Record that `file` defines `item`.
    ///
    /// The first definition per file wins. While `file` is watched the
    /// definition is mirrored into the watched shadow. Returns whether the
    /// file's definition is new to the main store.
    pub fn add_definition(
        &mut self,
        extension: ExtensionId,
        item: &str,
        file: &FileName,
        definition: Definition,
    ) -> Result<bool> {
        let info = self.extensions[extension.index()];
        let definition = if info.uses_definition_objects {
            definition
        } else {
            Definition::Exists
        };

        let Some((_, key, entry)) = self.items[extension.index()].get_full_mut(item) else {
            return Err(violation(ContractViolation::UnknownItem {
                extension: info.kind.name(),
                item: item.to_string(),
            }));
        };
        let key = key.clone();

        let added = entry.add_definition(file.clone(), definition.clone());
        self.files
            .entry(file.clone())
            .or_default()
            .add_item(extension, key.clone());

        if let Some(watched) = self.watched.as_mut().filter(|w| &w.file == file) {
            watched.add_definition(extension, key, definition);
        }

        if added {
            trace!(extension = info.kind.name(), item, file = %file, "added definition");
        }
        Ok(added)
    }

    fn change_definition(
        &mut self,
        extension: ExtensionId,
        item: &str,
        file: &FileName,
        definition: Definition,
    ) -> Result<()> {
        let info = self.extensions[extension.index()];
        if !info.uses_definition_objects {
            return Err(violation(ContractViolation::ChangedExistenceOnly {
                extension: info.kind.name(),
                item: item.to_string(),
            }));
        }
        let changed = self.items[extension.index()]
            .get_mut(item)
            .is_some_and(|entry| entry.change_definition(file, definition));
        if !changed {
            return Err(violation(ContractViolation::MissingDefinition {
                extension: info.kind.name(),
                item: item.to_string(),
                file: file.to_string(),
            }));
        }
        trace!(extension = info.kind.name(), item, file = %file, "changed definition");
        Ok(())
    }

    /// Returns whether that was the item's last definition.
    fn delete_definition(
        &mut self,
        extension: ExtensionId,
        item: &str,
        file: &FileName,
    ) -> Result<bool> {
        let name = self.extension_name(extension);
        let entry = self.items[extension.index()]
            .get_mut(item)
            .filter(|entry| entry.has_definition(file));
        let Some(entry) = entry else {
            return Err(violation(ContractViolation::MissingDefinition {
                extension: name,
                item: item.to_string(),
                file: file.to_string(),
            }));
        };
        entry.delete_definition(file);
        let was_last = !entry.has_definitions();

        if let Some(file_items) = self.files.get_mut(file) {
            file_items.delete_item(extension, item);
        }
        trace!(extension = name, item, file = %file, was_last, "deleted definition");
        Ok(was_last)
    }

    // ========================================================================
    // WATCH PROTOCOL
    // ========================================================================

    /// Start shadowing `file`. Must be paired with
    /// [`analyze_watched_file_changes`](Self::analyze_watched_file_changes)
    /// before any other file is watched.
    pub fn watch_file_for_changes(&mut self, file: &FileName) -> Result<()> {
        if let Some(active) = &self.watched {
            return Err(violation(ContractViolation::WatchAlreadyActive {
                active: active.file.to_string(),
                requested: file.to_string(),
            }));
        }
        debug!(file = %file, "watching file for changes");
        self.watched = Some(WatchedFile::new(file.clone()));
        Ok(())
    }

    pub fn watched_file(&self) -> Option<&FileName> {
        self.watched.as_ref().map(|w| &w.file)
    }

    /// Compare what the watched file used to define with what the reparse
    /// produced, committing changes and deletions and notifying `listener`.
    ///
    /// Extensions are processed in reverse registration order.
    pub fn analyze_watched_file_changes(
        &mut self,
        listener: &mut dyn DefinitionListener,
    ) -> Result<()> {
        let Some(watched) = self.watched.take() else {
            return Err(violation(ContractViolation::NoWatchedFile));
        };
        let file = watched.file.clone();
        let mut changed = 0usize;
        let mut deleted = 0usize;

        for extension in self.reverse_order() {
            let recorded: Vec<ItemString> = match self.files.get(&file) {
                Some(file_items) => file_items.items(extension).cloned().collect(),
                None => break,
            };
            let uses_definition_objects = self.uses_definition_objects(extension);

            for item in recorded {
                match watched.definition(extension, &item) {
                    Some(new) if uses_definition_objects => {
                        let old = self
                            .item(extension, &item)
                            .and_then(|entry| entry.definition(&file));
                        if old != Some(new) {
                            self.change_definition(extension, &item, &file, new.clone())?;
                            listener.on_changed_definition(self, extension, &item, &file)?;
                            changed += 1;
                        }
                    }
                    Some(_) => {}
                    None => {
                        let was_last = self.delete_definition(extension, &item, &file)?;
                        listener.on_deleted_definition(self, extension, &item, &file, was_last)?;
                        deleted += 1;
                    }
                }
            }
        }

        if self.files.get(&file).is_some_and(FileItems::is_empty) {
            self.files.shift_remove(&file);
        }
        debug!(file = %file, changed, deleted, "analyzed watched file");
        Ok(())
    }

    // ========================================================================
    // FILES
    // ========================================================================

    pub fn has_file(&self, file: &str) -> bool {
        self.files.contains_key(file)
    }

    pub fn files(&self) -> impl Iterator<Item = &FileName> {
        self.files.keys()
    }

    /// Items `file` currently defines in `extension`.
    pub fn file_items(&self, file: &str, extension: ExtensionId) -> Vec<ItemString> {
        self.files
            .get(file)
            .map(|file_items| file_items.items(extension).cloned().collect())
            .unwrap_or_default()
    }
}
