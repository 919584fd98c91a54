//! The Topic model: one documented entity and its rendered body.

use std::sync::Arc;

use crate::base::constants::SYMBOL_SEPARATOR;
use crate::language::{ScopeRule, TopicKind};

/// A structured documentation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub kind: TopicKind,
    /// Display title as written in the header.
    pub title: String,
    /// Container the topic's own symbol lives in; `None` is global.
    pub package: Option<Arc<str>>,
    /// Container references in the body resolve against.
    pub scope: Option<Arc<str>>,
    /// Normalized code signature. Never set on list topics.
    pub prototype: Option<String>,
    pub summary: Option<String>,
    /// NDMarkup body, `None` when the comment had no text after the header.
    pub body: Option<String>,
    /// 1-based line of the header (or declaration for auto-topics).
    pub line_number: usize,
    pub is_exported: bool,
    /// Parent classes, known only from language-grammar topics.
    pub parents: Vec<String>,
    /// Inserted to mark a package change; defines no symbol or class.
    pub is_delineator: bool,
}

impl Topic {
    pub fn new(kind: TopicKind, title: impl Into<String>, line_number: usize) -> Self {
        Self {
            kind,
            title: title.into(),
            package: None,
            scope: None,
            prototype: None,
            summary: None,
            body: None,
            line_number,
            is_exported: false,
            parents: Vec::new(),
            is_delineator: false,
        }
    }

    pub fn with_package(mut self, package: Option<Arc<str>>) -> Self {
        self.package = package.clone();
        self.scope = package;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.summary = crate::markup::summary(&body);
        self.body = Some(body);
        self
    }

    /// Set the prototype unless the topic is a list.
    pub fn set_prototype(&mut self, prototype: Option<String>) {
        if !self.kind.is_list() {
            self.prototype = prototype;
        }
    }

    /// The symbol this topic defines.
    ///
    /// Class, Section and File topics are named by their title alone; every
    /// other topic is qualified by its package.
    pub fn symbol(&self) -> String {
        match (self.kind.topic_type().scope_rule(), &self.package) {
            (ScopeRule::Normal, Some(package)) => qualify(package, &self.title),
            _ => self.title.clone(),
        }
    }

    /// Last segment of the title, as code would name it.
    pub fn unqualified_name(&self) -> &str {
        unqualified(&self.title)
    }
}

/// A topic inferred from the language grammar rather than a comment header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoTopic {
    pub kind: TopicKind,
    /// Unqualified name used for matching against comment titles.
    pub name: String,
    pub title: String,
    pub package: Option<Arc<str>>,
    pub prototype: Option<String>,
    pub line_number: usize,
    pub is_exported: bool,
    pub parents: Vec<String>,
}

impl AutoTopic {
    pub fn new(kind: impl Into<TopicKind>, title: impl Into<String>, line_number: usize) -> Self {
        let title = title.into();
        Self {
            kind: kind.into(),
            name: unqualified(&title).to_string(),
            title,
            package: None,
            prototype: None,
            line_number,
            is_exported: false,
            parents: Vec::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<Arc<str>>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_prototype(mut self, prototype: impl Into<String>) -> Self {
        self.prototype = Some(prototype.into());
        self
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn exported(mut self) -> Self {
        self.is_exported = true;
        self
    }

    /// An undocumented topic standing in for the declaration.
    pub fn into_topic(self) -> Topic {
        let mut topic =
            Topic::new(self.kind, self.title, self.line_number).with_package(self.package);
        topic.set_prototype(self.prototype);
        topic.is_exported = self.is_exported;
        topic.parents = self.parents;
        topic
    }
}

/// `package.name`
pub fn qualify(package: &str, name: &str) -> String {
    format!("{package}{SYMBOL_SEPARATOR}{name}")
}

/// The part of a qualified name after the last `.` or `::`.
pub fn unqualified(name: &str) -> &str {
    let after_dot = name.rsplit(SYMBOL_SEPARATOR).next().unwrap_or(name);
    after_dot.rsplit("::").next().unwrap_or(after_dot)
}

/// The package part of a qualified symbol, if any.
pub fn package_of(symbol: &str) -> Option<&str> {
    symbol.rsplit_once(SYMBOL_SEPARATOR).map(|(package, _)| package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::TopicType;
    use rstest::rstest;

    #[test]
    fn test_member_symbol_is_qualified() {
        let topic = Topic::new(TopicKind::Single(TopicType::Function), "Bark", 3)
            .with_package(Some("Dog".into()));
        assert_eq!(topic.symbol(), "Dog.Bark");
    }

    #[rstest]
    #[case(TopicType::Class)]
    #[case(TopicType::Section)]
    #[case(TopicType::File)]
    fn test_boundary_symbols_ignore_package(#[case] topic_type: TopicType) {
        let topic = Topic::new(topic_type.into(), "Title", 1).with_package(Some("Outer".into()));
        assert_eq!(topic.symbol(), "Title");
    }

    #[test]
    fn test_list_topics_reject_prototypes() {
        let mut topic = Topic::new(TopicKind::List(TopicType::Function), "Helpers", 1);
        topic.set_prototype(Some("void f()".into()));
        assert_eq!(topic.prototype, None);
    }

    #[test]
    fn test_body_sets_summary() {
        let topic = Topic::new(TopicType::Function.into(), "F", 1).with_body("<p>Does it. Well.</p>");
        assert_eq!(topic.summary.as_deref(), Some("Does it."));
    }

    #[rstest]
    #[case("Foo", "Foo")]
    #[case("A.B.Foo", "Foo")]
    #[case("ns::Foo", "Foo")]
    #[case("a.ns::Foo", "Foo")]
    fn test_unqualified(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(unqualified(name), expected);
    }

    #[test]
    fn test_package_of() {
        assert_eq!(package_of("A.B.x"), Some("A.B"));
        assert_eq!(package_of("x"), None);
    }
}
