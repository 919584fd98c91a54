use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::base::constants::KEY_SEPARATOR;
use crate::base::{FileName, ItemString, Result};
use crate::source_db::{Definition, ExtensionId, RebuildSet, SourceDb};

/// Item key of the edge `class → parent`.
pub fn edge_key(class: &str, parent: &str) -> ItemString {
    ItemString::from(format!("{class}{KEY_SEPARATOR}{parent}"))
}

pub fn split_edge_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(KEY_SEPARATOR)
}

/// One node of the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Class {
    parents: IndexSet<Arc<str>>,
    children: IndexSet<Arc<str>>,
}

impl Class {
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().map(|p| &**p)
    }

    pub fn children(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| &**c)
    }

    fn is_isolated(&self) -> bool {
        self.parents.is_empty() && self.children.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ClassHierarchy {
    class_ext: ExtensionId,
    parent_ext: ExtensionId,
    classes: IndexMap<Arc<str>, Class>,
}

impl ClassHierarchy {
    pub fn new(class_ext: ExtensionId, parent_ext: ExtensionId) -> Self {
        Self {
            class_ext,
            parent_ext,
            classes: IndexMap::new(),
        }
    }

    pub fn class_extension(&self) -> ExtensionId {
        self.class_ext
    }

    pub fn parent_extension(&self) -> ExtensionId {
        self.parent_ext
    }

    // ========================================================================
    // ADDING
    // ========================================================================

    /// Record that `file` defines `class`.
    ///
    /// A class gaining its first definition changes what its parents and
    /// children can link to, so their definers are marked.
    pub fn add_class(
        &mut self,
        db: &mut SourceDb,
        rebuild: &mut RebuildSet,
        file: &FileName,
        class: &str,
    ) -> Result<()> {
        self.ensure_class(class);
        db.ensure_item(self.class_ext, class);
        let added = db.add_definition(self.class_ext, class, file, Definition::Exists)?;
        if added && self.definition_count(db, class) == 1 {
            trace!(class, file = %file, "class gained first definition");
            self.mark_relatives(db, rebuild, class);
        }
        Ok(())
    }

    /// Record that `file` declares `parent` as a parent of `class`.
    pub fn add_parent(
        &mut self,
        db: &mut SourceDb,
        rebuild: &mut RebuildSet,
        file: &FileName,
        class: &str,
        parent: &str,
    ) -> Result<()> {
        let class_key = self.ensure_class(class);
        let parent_key = self.ensure_class(parent);

        let key = edge_key(class, parent);
        db.ensure_item(self.parent_ext, &key);
        if !db.add_definition(self.parent_ext, &key, file, Definition::Exists)? {
            return Ok(());
        }

        let edge_definitions = db
            .item(self.parent_ext, &key)
            .map_or(0, |item| item.definition_count());
        if edge_definitions == 1 {
            debug!(class, parent, file = %file, "new inheritance edge");
            if let Some(node) = self.classes.get_mut(class) {
                node.parents.insert(parent_key);
            }
            if let Some(node) = self.classes.get_mut(parent) {
                node.children.insert(class_key);
            }
            self.mark_definers(db, rebuild, class);
            self.mark_definers(db, rebuild, parent);
        }
        rebuild.mark(file);
        Ok(())
    }

    // ========================================================================
    // CHANGE NOTIFICATIONS
    // ========================================================================

    pub fn on_class_deleted(
        &mut self,
        db: &mut SourceDb,
        rebuild: &mut RebuildSet,
        class: &ItemString,
        was_last: bool,
    ) -> Result<()> {
        if !was_last {
            return Ok(());
        }
        trace!(class = %class, "class lost last definition");
        db.delete_item(self.class_ext, class)?;
        self.mark_relatives(db, rebuild, class);
        self.prune(db, class);
        Ok(())
    }

    pub fn on_parent_deleted(
        &mut self,
        db: &mut SourceDb,
        rebuild: &mut RebuildSet,
        key: &ItemString,
        was_last: bool,
    ) -> Result<()> {
        if !was_last {
            return Ok(());
        }
        db.delete_item(self.parent_ext, key)?;
        let Some((class, parent)) = split_edge_key(key) else {
            warn!(key = %key, "malformed inheritance edge key");
            return Ok(());
        };
        debug!(class, parent, "removed inheritance edge");
        if let Some(node) = self.classes.get_mut(class) {
            node.parents.shift_remove(parent);
        }
        if let Some(node) = self.classes.get_mut(parent) {
            node.children.shift_remove(class);
        }
        self.mark_definers(db, rebuild, class);
        self.mark_definers(db, rebuild, parent);
        self.prune(db, class);
        self.prune(db, parent);
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(|k| &**k)
    }

    pub fn children_of(&self, name: &str) -> Vec<&str> {
        self.classes
            .get(name)
            .map(|class| class.children().collect())
            .unwrap_or_default()
    }

    pub fn parents_of(&self, name: &str) -> Vec<&str> {
        self.classes
            .get(name)
            .map(|class| class.parents().collect())
            .unwrap_or_default()
    }

    /// Files that define `class`.
    pub fn defining_files(&self, db: &SourceDb, class: &str) -> Vec<FileName> {
        db.item(self.class_ext, class)
            .map(|item| item.defining_files().cloned().collect())
            .unwrap_or_default()
    }

    /// Files that declare the edge `class → parent`.
    pub fn edge_files(&self, db: &SourceDb, class: &str, parent: &str) -> Vec<FileName> {
        db.item(self.parent_ext, &edge_key(class, parent))
            .map(|item| item.defining_files().cloned().collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn ensure_class(&mut self, name: &str) -> Arc<str> {
        match self.classes.get_key_value(name) {
            Some((key, _)) => key.clone(),
            None => {
                let key: Arc<str> = Arc::from(name);
                self.classes.insert(key.clone(), Class::default());
                key
            }
        }
    }

    fn definition_count(&self, db: &SourceDb, class: &str) -> usize {
        db.item(self.class_ext, class)
            .map_or(0, |item| item.definition_count())
    }

    fn mark_definers(&self, db: &SourceDb, rebuild: &mut RebuildSet, class: &str) {
        if let Some(item) = db.item(self.class_ext, class) {
            rebuild.mark_all(item.defining_files());
        }
    }

    fn mark_relatives(&self, db: &SourceDb, rebuild: &mut RebuildSet, class: &str) {
        let Some(node) = self.classes.get(class) else {
            return;
        };
        for relative in node.parents.iter().chain(node.children.iter()) {
            self.mark_definers(db, rebuild, relative);
        }
    }

    /// Drop a node nothing defines or links to.
    fn prune(&mut self, db: &SourceDb, class: &str) {
        let isolated = self.classes.get(class).is_some_and(Class::is_isolated);
        if isolated && self.definition_count(db, class) == 0 {
            self.classes.shift_remove(class);
            trace!(class, "pruned class");
        }
    }
}
