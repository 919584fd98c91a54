//! SymbolTable: topic symbols, links between them, and what to rebuild
//! when either side changes.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::resolve::{candidates, reference_key};
use crate::base::{FileName, ItemString, Result};
use crate::source_db::{Definition, ExtensionId, RebuildSet, SourceDb, SymbolDefinition};

/// A registered link and its current interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub scope: Option<ItemString>,
    pub text: String,
    /// Symbols the link may refer to, best first.
    pub candidates: Vec<ItemString>,
    /// The best candidate that is currently defined.
    pub target: Option<ItemString>,
}

/// What a link resolves to from the point of view of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTarget {
    pub symbol: ItemString,
    /// File whose definition was chosen.
    pub file: FileName,
    pub definition: Definition,
}

/// Symbols and references stored in a [`SourceDb`], with reverse indexes for
/// retargeting links when symbols appear or disappear.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbol_ext: ExtensionId,
    reference_ext: ExtensionId,
    references: FxHashMap<ItemString, Reference>,
    /// candidate symbol → reference keys that list it
    by_candidate: FxHashMap<ItemString, IndexSet<ItemString>>,
}

impl SymbolTable {
    pub fn new(symbol_ext: ExtensionId, reference_ext: ExtensionId) -> Self {
        Self {
            symbol_ext,
            reference_ext,
            references: FxHashMap::default(),
            by_candidate: FxHashMap::default(),
        }
    }

    pub fn symbol_extension(&self) -> ExtensionId {
        self.symbol_ext
    }

    pub fn reference_extension(&self) -> ExtensionId {
        self.reference_ext
    }

    // ========================================================================
    // ADDING
    // ========================================================================

    /// Record that `file` defines `symbol`.
    ///
    /// When this is the symbol's first definition anywhere, links that could
    /// now resolve to it are retargeted.
    pub fn add_symbol(
        &mut self,
        db: &mut SourceDb,
        rebuild: &mut RebuildSet,
        file: &FileName,
        symbol: &str,
        definition: SymbolDefinition,
    ) -> Result<()> {
        db.ensure_item(self.symbol_ext, symbol);
        let added = db.add_definition(
            self.symbol_ext,
            symbol,
            file,
            Definition::Symbol(definition),
        )?;
        let first = db
            .item(self.symbol_ext, symbol)
            .is_some_and(|item| item.definition_count() == 1);
        if added && first {
            self.retarget_candidate(db, rebuild, symbol);
        }
        Ok(())
    }

    /// Record that `file` links to `text` from within `scope`.
    pub fn add_reference(
        &mut self,
        db: &mut SourceDb,
        file: &FileName,
        scope: Option<&str>,
        text: &str,
    ) -> Result<()> {
        let key = reference_key(scope, text);
        db.ensure_item(self.reference_ext, &key);
        if !self.references.contains_key(&key) {
            let candidates = candidates(scope, text);
            let target = self.best_candidate(db, &candidates);
            for candidate in &candidates {
                self.by_candidate
                    .entry(candidate.clone())
                    .or_default()
                    .insert(key.clone());
            }
            trace!(reference = text, target = ?target.as_deref(), "registered reference");
            self.references.insert(
                key.clone(),
                Reference {
                    scope: scope.map(ItemString::from),
                    text: text.to_string(),
                    candidates,
                    target,
                },
            );
        }
        db.add_definition(self.reference_ext, &key, file, Definition::Exists)?;
        Ok(())
    }

    // ========================================================================
    // CHANGE NOTIFICATIONS
    // ========================================================================

    /// A file's definition of `symbol` changed.
    ///
    /// Only the authoritative definition is visible through links, so
    /// referencing files are marked only when `file` holds it.
    pub fn on_symbol_changed(
        &mut self,
        db: &SourceDb,
        rebuild: &mut RebuildSet,
        symbol: &ItemString,
        file: &FileName,
    ) {
        let authoritative = db
            .item(self.symbol_ext, symbol)
            .and_then(|item| item.authoritative())
            .is_some_and(|(defining, _)| defining == file);
        if authoritative {
            self.mark_referencing_files(db, rebuild, symbol);
        }
    }

    /// A file stopped defining `symbol`.
    pub fn on_symbol_deleted(
        &mut self,
        db: &mut SourceDb,
        rebuild: &mut RebuildSet,
        symbol: &ItemString,
        was_last: bool,
    ) -> Result<()> {
        if was_last {
            db.delete_item(self.symbol_ext, symbol)?;
            self.retarget_candidate(db, rebuild, symbol);
        } else {
            self.mark_referencing_files(db, rebuild, symbol);
        }
        Ok(())
    }

    /// A file stopped linking to the reference `key`.
    pub fn on_reference_deleted(
        &mut self,
        db: &mut SourceDb,
        key: &ItemString,
        was_last: bool,
    ) -> Result<()> {
        if !was_last {
            return Ok(());
        }
        if let Some(reference) = self.references.remove(key) {
            for candidate in &reference.candidates {
                if let Some(keys) = self.by_candidate.get_mut(candidate) {
                    keys.shift_remove(key);
                    if keys.is_empty() {
                        self.by_candidate.remove(candidate);
                    }
                }
            }
        }
        db.delete_item(self.reference_ext, key)?;
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Resolve a link as seen from `from_file`.
    ///
    /// The first defined candidate wins. If `from_file` itself defines that
    /// symbol its own definition is returned, otherwise the authoritative one.
    pub fn references(
        &self,
        db: &SourceDb,
        scope: Option<&str>,
        text: &str,
        from_file: &str,
    ) -> Option<ReferenceTarget> {
        let key = reference_key(scope, text);
        let symbol = match self.references.get(&key) {
            Some(reference) => reference.target.clone()?,
            None => self.best_candidate(db, &candidates(scope, text))?,
        };
        let item = db.item(self.symbol_ext, &symbol)?;
        let (file, definition) = item
            .definition_entry(from_file)
            .or_else(|| item.authoritative())?;
        Some(ReferenceTarget {
            file: file.clone(),
            definition: definition.clone(),
            symbol,
        })
    }

    pub fn reference(&self, scope: Option<&str>, text: &str) -> Option<&Reference> {
        self.references.get(&reference_key(scope, text))
    }

    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    /// Files whose links currently resolve to `symbol`.
    pub fn referencing_files(&self, db: &SourceDb, symbol: &str) -> Vec<FileName> {
        let mut files: IndexSet<FileName> = IndexSet::new();
        for key in self.keys_targeting(symbol) {
            if let Some(item) = db.item(self.reference_ext, &key) {
                files.extend(item.defining_files().cloned());
            }
        }
        files.into_iter().collect()
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn best_candidate(&self, db: &SourceDb, candidates: &[ItemString]) -> Option<ItemString> {
        candidates
            .iter()
            .find(|candidate| {
                db.item(self.symbol_ext, candidate)
                    .is_some_and(|item| item.has_definitions())
            })
            .cloned()
    }

    fn keys_targeting(&self, symbol: &str) -> Vec<ItemString> {
        self.by_candidate
            .get(symbol)
            .into_iter()
            .flatten()
            .filter(|key| {
                self.references
                    .get(*key)
                    .and_then(|r| r.target.as_deref())
                    == Some(symbol)
            })
            .cloned()
            .collect()
    }

    fn mark_referencing_files(&self, db: &SourceDb, rebuild: &mut RebuildSet, symbol: &str) {
        let files = self.referencing_files(db, symbol);
        rebuild.mark_all(&files);
    }

    /// Recompute the target of every link that lists `symbol` as a candidate,
    /// marking the files of links whose target moved.
    fn retarget_candidate(&mut self, db: &SourceDb, rebuild: &mut RebuildSet, symbol: &str) {
        let keys: Vec<ItemString> = self
            .by_candidate
            .get(symbol)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default();
        let mut moved = 0usize;

        for key in keys {
            let Some(candidates) = self.references.get(&key).map(|r| r.candidates.clone()) else {
                continue;
            };
            let target = self.best_candidate(db, &candidates);
            let Some(reference) = self.references.get_mut(&key) else {
                continue;
            };
            if reference.target == target {
                continue;
            }
            reference.target = target;
            moved += 1;
            if let Some(item) = db.item(self.reference_ext, &key) {
                rebuild.mark_all(item.defining_files());
            }
        }
        if moved > 0 {
            debug!(symbol, moved, "retargeted references");
        }
    }
}
