//! Per-file parse: scan → clean → extract → merge.

use rayon::prelude::*;
use tracing::debug;

use crate::base::{FileName, Settings};
use crate::language::{LanguageSpec, TopicSynonyms};
use crate::parser::{CommentCleaner, CommentScanner, RawComment};
use crate::topics::{AutoTopic, AutoTopicMerger, Topic, TopicExtractor, default_title};

/// One file handed to the pipeline.
#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    pub name: FileName,
    pub text: &'a str,
    pub language: &'a LanguageSpec,
    /// Declarations found by a language grammar, if any.
    pub auto_topics: Vec<AutoTopic>,
}

impl<'a> SourceFile<'a> {
    pub fn new(name: impl Into<FileName>, text: &'a str, language: &'a LanguageSpec) -> Self {
        Self {
            name: name.into(),
            text,
            language,
            auto_topics: Vec::new(),
        }
    }

    pub fn with_auto_topics(mut self, auto_topics: Vec<AutoTopic>) -> Self {
        self.auto_topics = auto_topics;
        self
    }
}

/// The topics of one file, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub file: FileName,
    pub topics: Vec<Topic>,
    pub title: String,
}

/// Parse one file. Pure: reads nothing but its arguments.
pub fn parse_source(
    source: &SourceFile<'_>,
    settings: &Settings,
    synonyms: &TopicSynonyms,
) -> ParsedFile {
    let cleaner = CommentCleaner::from_settings(settings);
    let mut extractor = TopicExtractor::new(synonyms);
    let mut topics = Vec::new();
    let mut comments = 0usize;

    for comment in CommentScanner::new(source.text, source.language, synonyms) {
        let first_line = comment.line_number();
        let RawComment {
            mut lines,
            prototype,
            opener,
            ..
        } = comment;
        let cleaner = match opener.as_deref() {
            Some(opener) => cleaner.after_opener(opener),
            None => cleaner,
        };
        let found = if settings.preserve_line_numbers {
            cleaner.clean(&mut lines);
            extractor.extract(&lines, first_line, prototype.as_deref())
        } else {
            let (line_numbers, lines): (Vec<usize>, Vec<String>) = cleaner
                .clean_compact_indexed(lines)
                .into_iter()
                .map(|(index, line)| (first_line + index, line))
                .unzip();
            extractor.extract_at(&lines, &line_numbers, prototype.as_deref())
        };
        topics.extend(found);
        comments += 1;
    }

    let topics = AutoTopicMerger::from_settings(settings).merge(topics, source.auto_topics.clone());
    let title = default_title(&topics, &source.name);
    debug!(
        file = %source.name,
        language = %source.language.name,
        comments,
        topics = topics.len(),
        "parsed file"
    );

    ParsedFile {
        file: source.name.clone(),
        topics,
        title,
    }
}

/// Parse a batch, on the rayon pool when `settings.parallel` is set.
/// Output order follows input order either way.
pub fn parse_sources(
    sources: &[SourceFile<'_>],
    settings: &Settings,
    synonyms: &TopicSynonyms,
) -> Vec<ParsedFile> {
    if settings.parallel {
        sources
            .par_iter()
            .map(|source| parse_source(source, settings, synonyms))
            .collect()
    } else {
        sources
            .iter()
            .map(|source| parse_source(source, settings, synonyms))
            .collect()
    }
}
