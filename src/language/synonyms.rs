//! Header keywords ("Function", "Classes", ...) mapped to topic kinds.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

use super::topic_kind::{TopicKind, TopicType};

static RE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ *([a-z0-9 ]*[a-z0-9]): +(.*)$").unwrap());

/// A recognized `Keyword: Title` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    pub kind: TopicKind,
    pub title: String,
}

/// Case-insensitive keyword table.
///
/// Singular keywords map to [`TopicKind::Single`], plurals to [`TopicKind::List`].
#[derive(Debug, Clone, Default)]
pub struct TopicSynonyms {
    keywords: IndexMap<String, TopicKind>,
}

/// (type, singular keywords, plural keywords)
const ENGLISH: &[(TopicType, &[&str], &[&str])] = &[
    (
        TopicType::Class,
        &["class", "structure", "struct", "interface", "module", "package", "namespace"],
        &["classes", "structures", "structs", "interfaces", "modules", "packages", "namespaces"],
    ),
    (TopicType::Section, &["section", "title"], &[]),
    (TopicType::File, &["file", "program", "script"], &["files", "programs", "scripts"]),
    (TopicType::Group, &["group"], &[]),
    (
        TopicType::Function,
        &[
            "function", "func", "procedure", "proc", "routine", "subroutine", "sub", "method",
            "callback", "constructor", "destructor", "operator",
        ],
        &[
            "functions", "funcs", "procedures", "procs", "routines", "subroutines", "subs",
            "methods", "callbacks", "constructors", "destructors", "operators",
        ],
    ),
    (
        TopicType::Variable,
        &[
            "variable", "var", "integer", "int", "float", "double", "string", "str", "bool",
            "boolean", "array", "hash", "object", "pointer", "handle", "field",
        ],
        &[
            "variables", "vars", "integers", "ints", "floats", "doubles", "strings", "bools",
            "booleans", "arrays", "hashes", "objects", "pointers", "handles", "fields",
        ],
    ),
    (TopicType::Property, &["property", "prop"], &["properties", "props"]),
    (
        TopicType::Type,
        &["type", "typedef", "enum", "enumeration"],
        &["types", "typedefs", "enums", "enumerations"],
    ),
    (
        TopicType::Constant,
        &["constant", "const", "define", "macro"],
        &["constants", "consts", "defines", "macros"],
    ),
    (TopicType::Generic, &["topic", "about", "note"], &["topics", "notes"]),
];

impl TopicSynonyms {
    /// An empty table; no line will be recognized as a header.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in English keyword table.
    pub fn english() -> Self {
        let mut synonyms = Self::new();
        for (topic_type, singular, plural) in ENGLISH {
            for keyword in *singular {
                synonyms.insert(keyword, TopicKind::Single(*topic_type));
            }
            for keyword in *plural {
                synonyms.insert(keyword, TopicKind::List(*topic_type));
            }
        }
        synonyms
    }

    /// Add or replace a keyword.
    pub fn insert(&mut self, keyword: &str, kind: TopicKind) {
        self.keywords.insert(normalize_keyword(keyword), kind);
    }

    pub fn with(mut self, keyword: &str, kind: TopicKind) -> Self {
        self.insert(keyword, kind);
        self
    }

    pub fn lookup(&self, keyword: &str) -> Option<TopicKind> {
        self.keywords.get(&normalize_keyword(keyword)).copied()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Recognize a `Keyword: Title` header.
    ///
    /// Does not check whether the previous line was blank; callers own that
    /// context.
    pub fn parse_header(&self, line: &str) -> Option<HeaderLine> {
        let caps = RE_HEADER.captures(line)?;
        let title = caps[2].trim_end_matches(' ');
        if title.is_empty() {
            return None;
        }
        let kind = self.lookup(&caps[1])?;
        Some(HeaderLine {
            kind,
            title: title.to_string(),
        })
    }
}

fn normalize_keyword(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
