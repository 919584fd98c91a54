//! Per-language comment syntax descriptor.

use super::topic_kind::TopicType;

/// A symbol that ends a prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrototypeEnder {
    /// A literal symbol such as `;` or `{`.
    Symbol(String),
    /// The end of a line (unless escaped by the language's line extender).
    LineBreak,
}

impl PrototypeEnder {
    /// Parse the textual form used by language tables, where `\n` means a line break.
    pub fn parse(text: &str) -> Self {
        if text == "\\n" || text == "\n" {
            PrototypeEnder::LineBreak
        } else {
            PrototypeEnder::Symbol(text.to_string())
        }
    }
}

/// Everything the comment scanner needs to know about one source language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSpec {
    pub name: String,
    /// Markers that start a comment running to the end of the line (`//`, `#`).
    pub line_comment_markers: Vec<String>,
    /// Opening/closing marker pairs (`/*`, `*/`).
    pub block_comment_markers: Vec<(String, String)>,
    /// Symbols ending a function prototype.
    pub function_enders: Vec<PrototypeEnder>,
    /// Symbols ending a variable, property or constant prototype.
    pub variable_enders: Vec<PrototypeEnder>,
    /// Symbol that escapes a line break inside a prototype (`\` in shells).
    pub line_extender: Option<String>,
    /// Treat the entire file as a single comment (plain-text documentation files).
    pub whole_file_is_comment: bool,
}

impl LanguageSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_line_comments<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.line_comment_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_block_comments<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        self.block_comment_markers = markers
            .into_iter()
            .map(|(open, close)| (open.into(), close.into()))
            .collect();
        self
    }

    pub fn with_function_enders<'a, I>(mut self, enders: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.function_enders = enders.into_iter().map(PrototypeEnder::parse).collect();
        self
    }

    pub fn with_variable_enders<'a, I>(mut self, enders: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.variable_enders = enders.into_iter().map(PrototypeEnder::parse).collect();
        self
    }

    pub fn with_line_extender(mut self, extender: impl Into<String>) -> Self {
        self.line_extender = Some(extender.into());
        self
    }

    pub fn with_whole_file_as_comment(mut self, whole_file: bool) -> Self {
        self.whole_file_is_comment = whole_file;
        self
    }

    /// A plain-text language whose files are one big comment.
    pub fn text_file(name: impl Into<String>) -> Self {
        Self::new(name).with_whole_file_as_comment(true)
    }

    pub fn has_line_comments(&self) -> bool {
        !self.line_comment_markers.is_empty()
    }

    pub fn has_block_comments(&self) -> bool {
        !self.block_comment_markers.is_empty()
    }

    /// Whether the scanner should return the whole file as one comment.
    pub fn treats_whole_file_as_comment(&self) -> bool {
        self.whole_file_is_comment || (!self.has_line_comments() && !self.has_block_comments())
    }

    /// Prototype enders for a topic type, or `None` if the language defines none.
    pub fn prototype_enders(&self, topic_type: TopicType) -> Option<&[PrototypeEnder]> {
        let enders = match topic_type {
            TopicType::Function => &self.function_enders,
            TopicType::Variable | TopicType::Property | TopicType::Constant => {
                &self.variable_enders
            }
            _ => return None,
        };
        (!enders.is_empty()).then_some(enders.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers_means_whole_file() {
        let lang = LanguageSpec::new("Text");
        assert!(lang.treats_whole_file_as_comment());
        let lang = LanguageSpec::new("Shell").with_line_comments(["#"]);
        assert!(!lang.treats_whole_file_as_comment());
    }

    #[test]
    fn test_prototype_enders_by_type() {
        let lang = LanguageSpec::new("C")
            .with_function_enders([";", "{"])
            .with_variable_enders([";", "="]);
        assert_eq!(lang.prototype_enders(TopicType::Function).map(<[_]>::len), Some(2));
        assert!(lang.prototype_enders(TopicType::Constant).is_some());
        assert!(lang.prototype_enders(TopicType::Class).is_none());
    }

    #[test]
    fn test_line_break_ender() {
        assert_eq!(PrototypeEnder::parse("\\n"), PrototypeEnder::LineBreak);
        assert_eq!(
            PrototypeEnder::parse(";"),
            PrototypeEnder::Symbol(";".to_string())
        );
    }
}
