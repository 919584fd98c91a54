//! Extension registration and change notification.

use super::store::SourceDb;
use crate::base::{FileName, ItemString, Result};

/// Stable ordinal handed out by [`SourceDb::register_extension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionId(pub(super) usize);

impl ExtensionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The known consumers of the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    /// Topic symbols with rich definitions.
    Symbols,
    /// Links from topic bodies, existence only.
    References,
    /// Class definitions, existence only.
    Classes,
    /// Class-to-parent edges, existence only.
    ClassParents,
}

impl ExtensionKind {
    pub fn name(self) -> &'static str {
        match self {
            ExtensionKind::Symbols => "symbols",
            ExtensionKind::References => "references",
            ExtensionKind::Classes => "classes",
            ExtensionKind::ClassParents => "class parents",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct ExtensionInfo {
    pub(super) kind: ExtensionKind,
    pub(super) uses_definition_objects: bool,
}

/// Receives the changes detected by
/// [`SourceDb::analyze_watched_file_changes`].
///
/// Callbacks arrive in reverse registration order and may mutate the
/// database, e.g. to delete an item whose last definition went away.
pub trait DefinitionListener {
    /// The file's definition of `item` was replaced by a different one.
    fn on_changed_definition(
        &mut self,
        db: &mut SourceDb,
        extension: ExtensionId,
        item: &ItemString,
        file: &FileName,
    ) -> Result<()>;

    /// The file no longer defines `item`. `was_last` is set when no file
    /// defines it any more.
    fn on_deleted_definition(
        &mut self,
        db: &mut SourceDb,
        extension: ExtensionId,
        item: &ItemString,
        file: &FileName,
        was_last: bool,
    ) -> Result<()>;
}

/// A listener that ignores every change.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreChanges;

impl DefinitionListener for IgnoreChanges {
    fn on_changed_definition(
        &mut self,
        _db: &mut SourceDb,
        _extension: ExtensionId,
        _item: &ItemString,
        _file: &FileName,
    ) -> Result<()> {
        Ok(())
    }

    fn on_deleted_definition(
        &mut self,
        _db: &mut SourceDb,
        _extension: ExtensionId,
        _item: &ItemString,
        _file: &FileName,
        _was_last: bool,
    ) -> Result<()> {
        Ok(())
    }
}
