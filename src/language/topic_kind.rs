//! Topic kinds and their scoping behavior.

use std::fmt;

/// What a topic documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TopicType {
    Class,
    Section,
    File,
    Group,
    Function,
    Variable,
    Property,
    Type,
    Constant,
    Generic,
}

/// How a topic type affects the package of the topics that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeRule {
    /// Opens a new package named after the topic (classes).
    Start,
    /// Closes the current package and returns to global scope (sections).
    End,
    /// Always global itself and leaves the current package untouched (files).
    AlwaysGlobal,
    /// Lives in the current package.
    Normal,
}

impl TopicType {
    pub const ALL: [TopicType; 10] = [
        TopicType::Class,
        TopicType::Section,
        TopicType::File,
        TopicType::Group,
        TopicType::Function,
        TopicType::Variable,
        TopicType::Property,
        TopicType::Type,
        TopicType::Constant,
        TopicType::Generic,
    ];

    pub fn scope_rule(self) -> ScopeRule {
        match self {
            TopicType::Class => ScopeRule::Start,
            TopicType::Section => ScopeRule::End,
            TopicType::File => ScopeRule::AlwaysGlobal,
            _ => ScopeRule::Normal,
        }
    }

    /// Whether a code prototype may follow a comment of this type.
    pub fn takes_prototype(self) -> bool {
        matches!(
            self,
            TopicType::Function | TopicType::Variable | TopicType::Property | TopicType::Constant
        )
    }

    /// Whether this type names the page when it is the first topic of a file.
    pub fn page_title_if_first(self) -> bool {
        matches!(self, TopicType::Class | TopicType::Section | TopicType::File)
    }

    /// Whether the topic's own symbol ignores the enclosing package.
    pub fn is_scope_boundary(self) -> bool {
        matches!(self.scope_rule(), ScopeRule::Start | ScopeRule::End)
    }

    pub fn name(self) -> &'static str {
        match self {
            TopicType::Class => "Class",
            TopicType::Section => "Section",
            TopicType::File => "File",
            TopicType::Group => "Group",
            TopicType::Function => "Function",
            TopicType::Variable => "Variable",
            TopicType::Property => "Property",
            TopicType::Type => "Type",
            TopicType::Constant => "Constant",
            TopicType::Generic => "Generic",
        }
    }
}

impl fmt::Display for TopicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A topic type, either as a single item or as a list of such items.
///
/// List topics ("Functions: Helpers") document several items in one body and
/// never carry a prototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TopicKind {
    Single(TopicType),
    List(TopicType),
}

impl TopicKind {
    pub fn topic_type(self) -> TopicType {
        match self {
            TopicKind::Single(t) | TopicKind::List(t) => t,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, TopicKind::List(_))
    }

    pub fn is(self, topic_type: TopicType) -> bool {
        self.topic_type() == topic_type
    }

    /// Whether a prototype can be attached to a topic of this kind.
    pub fn takes_prototype(self) -> bool {
        !self.is_list() && self.topic_type().takes_prototype()
    }
}

impl From<TopicType> for TopicKind {
    fn from(topic_type: TopicType) -> Self {
        TopicKind::Single(topic_type)
    }
}

impl fmt::Display for TopicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicKind::Single(t) => write!(f, "{t}"),
            TopicKind::List(t) => write!(f, "List of {t}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_rules() {
        assert_eq!(TopicType::Class.scope_rule(), ScopeRule::Start);
        assert_eq!(TopicType::Section.scope_rule(), ScopeRule::End);
        assert_eq!(TopicType::File.scope_rule(), ScopeRule::AlwaysGlobal);
        assert_eq!(TopicType::Function.scope_rule(), ScopeRule::Normal);
    }

    #[test]
    fn test_lists_never_take_prototypes() {
        assert!(TopicKind::Single(TopicType::Function).takes_prototype());
        assert!(!TopicKind::List(TopicType::Function).takes_prototype());
        assert!(!TopicKind::Single(TopicType::Class).takes_prototype());
    }
}
