//! Session: the single owner of the incremental database and its
//! extensions.

use std::path::Path;

use tracing::{debug, info, warn};

use super::pipeline::{ParsedFile, SourceFile, parse_source, parse_sources};
use crate::base::{FileName, ItemString, NdocError, Result, Settings};
use crate::class_hierarchy::ClassHierarchy;
use crate::language::{LanguageSpec, ScopeRule, TopicKind, TopicSynonyms, TopicType};
use crate::markup::{link_targets, symbol_entries};
use crate::source_db::{
    DefinitionListener, ExtensionId, ExtensionKind, RebuildSet, SourceDb, SymbolDefinition,
};
use crate::symbols::{ReferenceTarget, SymbolTable};
use crate::topics::{AutoTopic, Topic, qualify};

/// Routes watch-protocol notifications to the extension that owns them.
struct Listeners<'a> {
    symbols: &'a mut SymbolTable,
    classes: &'a mut ClassHierarchy,
    rebuild: &'a mut RebuildSet,
}

impl DefinitionListener for Listeners<'_> {
    fn on_changed_definition(
        &mut self,
        db: &mut SourceDb,
        extension: ExtensionId,
        item: &ItemString,
        file: &FileName,
    ) -> Result<()> {
        if extension == self.symbols.symbol_extension() {
            self.symbols.on_symbol_changed(db, self.rebuild, item, file);
        }
        Ok(())
    }

    fn on_deleted_definition(
        &mut self,
        db: &mut SourceDb,
        extension: ExtensionId,
        item: &ItemString,
        _file: &FileName,
        was_last: bool,
    ) -> Result<()> {
        match db.extension_kind(extension) {
            ExtensionKind::Symbols => {
                self.symbols
                    .on_symbol_deleted(db, self.rebuild, item, was_last)
            }
            ExtensionKind::References => self.symbols.on_reference_deleted(db, item, was_last),
            ExtensionKind::Classes => {
                self.classes
                    .on_class_deleted(db, self.rebuild, item, was_last)
            }
            ExtensionKind::ClassParents => {
                self.classes
                    .on_parent_deleted(db, self.rebuild, item, was_last)
            }
        }
    }
}

/// Owns one project's symbol store, its extensions and the rebuild set.
///
/// Files are parsed independently but committed strictly one at a time.
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    synonyms: TopicSynonyms,
    db: SourceDb,
    symbols: SymbolTable,
    classes: ClassHierarchy,
    rebuild: RebuildSet,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self::with_synonyms(settings, TopicSynonyms::english())
    }

    pub fn with_synonyms(settings: Settings, synonyms: TopicSynonyms) -> Self {
        let mut db = SourceDb::new();
        let symbol_ext = db.register_extension(ExtensionKind::Symbols, true);
        let reference_ext = db.register_extension(ExtensionKind::References, false);
        let class_ext = db.register_extension(ExtensionKind::Classes, false);
        let parent_ext = db.register_extension(ExtensionKind::ClassParents, false);
        Self {
            settings,
            synonyms,
            db,
            symbols: SymbolTable::new(symbol_ext, reference_ext),
            classes: ClassHierarchy::new(class_ext, parent_ext),
            rebuild: RebuildSet::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn synonyms(&self) -> &TopicSynonyms {
        &self.synonyms
    }

    pub fn db(&self) -> &SourceDb {
        &self.db
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn classes(&self) -> &ClassHierarchy {
        &self.classes
    }

    pub fn rebuild_set(&self) -> &RebuildSet {
        &self.rebuild
    }

    /// Hand the accumulated rebuild set to the caller and start a new one.
    pub fn take_rebuild_set(&mut self) -> RebuildSet {
        std::mem::take(&mut self.rebuild)
    }

    // ========================================================================
    // PARSING AND COMMITTING
    // ========================================================================

    pub fn parse(&self, source: &SourceFile<'_>) -> ParsedFile {
        parse_source(source, &self.settings, &self.synonyms)
    }

    /// Replace everything the file previously defined with `parsed`.
    ///
    /// The file itself is always marked for rebuild; other files are marked
    /// when what they link to or inherit from changed.
    pub fn commit(&mut self, parsed: &ParsedFile) -> Result<()> {
        let file = &parsed.file;
        self.db.watch_file_for_changes(file)?;
        let mut links = 0usize;
        let mut edges = 0usize;

        // Additions in registration order.
        for topic in parsed.topics.iter().filter(|t| !t.is_delineator) {
            self.add_symbols(file, topic)?;
        }
        for topic in &parsed.topics {
            let Some(body) = topic.body.as_deref() else {
                continue;
            };
            for target in link_targets(body) {
                self.symbols
                    .add_reference(&mut self.db, file, topic.scope.as_deref(), &target)?;
                links += 1;
            }
        }
        for topic in parsed.topics.iter().filter(|t| is_class(t)) {
            self.classes
                .add_class(&mut self.db, &mut self.rebuild, file, &topic.symbol())?;
        }
        for topic in parsed.topics.iter().filter(|t| !t.parents.is_empty()) {
            let class = topic.symbol();
            for parent in &topic.parents {
                self.classes
                    .add_parent(&mut self.db, &mut self.rebuild, file, &class, parent)?;
                edges += 1;
            }
        }
        debug!(
            file = %file,
            topics = parsed.topics.len(),
            links,
            edges,
            "committing file"
        );

        let mut listeners = Listeners {
            symbols: &mut self.symbols,
            classes: &mut self.classes,
            rebuild: &mut self.rebuild,
        };
        self.db.analyze_watched_file_changes(&mut listeners)?;
        self.rebuild.mark(file);
        Ok(())
    }

    /// Parse and commit one file.
    pub fn reparse_file(&mut self, source: &SourceFile<'_>) -> Result<ParsedFile> {
        let parsed = self.parse(source);
        self.commit(&parsed)?;
        Ok(parsed)
    }

    /// Read a file from disk, then parse and commit it.
    pub fn reparse_path(
        &mut self,
        path: &Path,
        language: &LanguageSpec,
        auto_topics: Vec<AutoTopic>,
    ) -> Result<ParsedFile> {
        let text = std::fs::read_to_string(path).map_err(|e| NdocError::io(path, e))?;
        let name = FileName::from(path.to_string_lossy());
        let source = SourceFile::new(name, &text, language).with_auto_topics(auto_topics);
        self.reparse_file(&source)
    }

    /// Parse a batch (in parallel if configured) and commit in input order.
    pub fn reparse_all(&mut self, sources: &[SourceFile<'_>]) -> Result<Vec<ParsedFile>> {
        let parsed = parse_sources(sources, &self.settings, &self.synonyms);
        for file in &parsed {
            self.commit(file)?;
        }
        info!(
            files = parsed.len(),
            rebuild = self.rebuild.len(),
            "reparsed batch"
        );
        Ok(parsed)
    }

    /// Forget a deleted file: every definition it held is removed through the
    /// watch protocol so dependents are marked.
    pub fn remove_file(&mut self, file: &FileName) -> Result<()> {
        self.db.watch_file_for_changes(file)?;
        let mut listeners = Listeners {
            symbols: &mut self.symbols,
            classes: &mut self.classes,
            rebuild: &mut self.rebuild,
        };
        self.db.analyze_watched_file_changes(&mut listeners)?;
        self.rebuild.unmark(file);
        debug!(file = %file, "removed file");
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// What a link in `from_file` resolves to.
    pub fn references(
        &self,
        scope: Option<&str>,
        text: &str,
        from_file: &str,
    ) -> Option<ReferenceTarget> {
        self.symbols.references(&self.db, scope, text, from_file)
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    /// A plain topic defines its own symbol; a list topic defines one per
    /// `<ds>` entry.
    fn add_symbols(&mut self, file: &FileName, topic: &Topic) -> Result<()> {
        if !topic.kind.is_list() {
            let definition = SymbolDefinition {
                kind: topic.kind,
                prototype: topic.prototype.clone(),
                summary: topic.summary.clone(),
            };
            return self.add_symbol(file, &topic.symbol(), definition);
        }

        let Some(body) = topic.body.as_deref() else {
            return Ok(());
        };
        let topic_type = topic.kind.topic_type();
        for entry in symbol_entries(body) {
            let symbol = match (topic_type.scope_rule(), topic.package.as_deref()) {
                (ScopeRule::Normal, Some(package)) => qualify(package, &entry.name),
                _ => entry.name,
            };
            let definition = SymbolDefinition {
                kind: TopicKind::Single(topic_type),
                prototype: None,
                summary: entry.summary,
            };
            self.add_symbol(file, &symbol, definition)?;
        }
        Ok(())
    }

    fn add_symbol(
        &mut self,
        file: &FileName,
        symbol: &str,
        definition: SymbolDefinition,
    ) -> Result<()> {
        if symbol.is_empty() {
            warn!(file = %file, kind = ?definition.kind, "topic without a name defines no symbol");
            return Ok(());
        }
        self.symbols
            .add_symbol(&mut self.db, &mut self.rebuild, file, symbol, definition)
    }
}

fn is_class(topic: &Topic) -> bool {
    topic.kind == TopicKind::Single(TopicType::Class) && !topic.is_delineator
}
