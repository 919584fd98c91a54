//! Splitting a cleaned comment into topics.

use std::path::Path;
use std::sync::Arc;

use tracing::trace;

use super::topic::Topic;
use crate::language::{ScopeRule, TopicKind, TopicSynonyms};
use crate::markup::MarkupFormatter;
use crate::parser::{is_code_end, is_code_start, normalize_prototype};

/// Package and scope carried from one comment to the next within a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Container new topics' symbols are placed in.
    pub package: Option<Arc<str>>,
    /// Container bodies resolve their links against.
    pub scope: Option<Arc<str>>,
}

impl ParseContext {
    pub fn global() -> Self {
        Self::default()
    }
}

/// A header line and the body lines that follow it.
struct PendingTopic {
    kind: TopicKind,
    title: String,
    line_number: usize,
    body_start: usize,
}

/// Converts cleaned comments into topics, tracking package and scope across
/// the comments of one file.
pub struct TopicExtractor<'a> {
    synonyms: &'a TopicSynonyms,
    context: ParseContext,
}

impl<'a> TopicExtractor<'a> {
    pub fn new(synonyms: &'a TopicSynonyms) -> Self {
        Self {
            synonyms,
            context: ParseContext::global(),
        }
    }

    pub fn with_context(synonyms: &'a TopicSynonyms, context: ParseContext) -> Self {
        Self { synonyms, context }
    }

    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    /// Extract the topics of one cleaned comment.
    ///
    /// `first_line` is the 1-based source line of `lines[0]`; lines must be
    /// line-preserving so topic line numbers stay exact. `prototype` is the
    /// raw candidate captured after the comment.
    pub fn extract<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        first_line: usize,
        prototype: Option<&str>,
    ) -> Vec<Topic> {
        self.extract_with(lines, |index| first_line + index, prototype)
    }

    /// Extract from lines that no longer map one-to-one onto the source,
    /// such as compacted output. `line_numbers[i]` is the 1-based source line
    /// of `lines[i]`.
    pub fn extract_at<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        line_numbers: &[usize],
        prototype: Option<&str>,
    ) -> Vec<Topic> {
        debug_assert_eq!(lines.len(), line_numbers.len());
        self.extract_with(
            lines,
            |index| line_numbers.get(index).copied().unwrap_or_default(),
            prototype,
        )
    }

    fn extract_with<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        line_number: impl Fn(usize) -> usize,
        prototype: Option<&str>,
    ) -> Vec<Topic> {
        let mut topics = Vec::new();
        let mut pending: Option<PendingTopic> = None;
        let mut prev_blank = true;
        let mut in_code = false;

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();

            if in_code {
                in_code = !is_code_end(line);
                prev_blank = false;
                continue;
            }
            if is_code_start(line) {
                in_code = true;
                prev_blank = false;
                continue;
            }

            if prev_blank {
                if let Some(header) = self.synonyms.parse_header(line) {
                    if let Some(done) = pending.take() {
                        topics.push(self.finish(done, &lines[..index]));
                    }
                    pending = Some(PendingTopic {
                        kind: header.kind,
                        title: header.title,
                        line_number: line_number(index),
                        body_start: index + 1,
                    });
                    prev_blank = false;
                    continue;
                }
            }
            prev_blank = line.trim().is_empty();
        }

        if let Some(done) = pending {
            topics.push(self.finish(done, lines));
        }

        if let [topic] = topics.as_mut_slice() {
            if let Some(raw) = prototype {
                apply_prototype(topic, raw);
            }
        }
        topics
    }

    /// Build the topic and move the context past it.
    fn finish<S: AsRef<str>>(&mut self, pending: PendingTopic, lines: &[S]) -> Topic {
        let mut topic = Topic::new(pending.kind, pending.title, pending.line_number);

        match pending.kind.topic_type().scope_rule() {
            ScopeRule::Start => {
                let name: Arc<str> = Arc::from(topic.title.as_str());
                self.context.package = Some(name.clone());
                self.context.scope = Some(name);
                topic.package = self.context.package.clone();
                topic.scope = self.context.scope.clone();
            }
            ScopeRule::End => {
                self.context = ParseContext::global();
            }
            ScopeRule::AlwaysGlobal => {
                topic.scope = self.context.scope.clone();
            }
            ScopeRule::Normal => {
                topic.package = self.context.package.clone();
                topic.scope = self.context.scope.clone();
            }
        }

        let body_lines = &lines[pending.body_start.min(lines.len())..];
        let body = MarkupFormatter::new(pending.kind).format(body_lines);
        if !body.is_empty() {
            topic = topic.with_body(body);
        }
        topic
    }
}

/// Attach a captured prototype if it names the topic.
fn apply_prototype(topic: &mut Topic, raw: &str) {
    if !topic.kind.takes_prototype() {
        return;
    }
    let prototype = normalize_prototype(raw);
    if prototype.is_empty() {
        return;
    }
    if prototype.contains(topic.unqualified_name()) {
        topic.set_prototype(Some(prototype));
    } else {
        trace!(
            title = %topic.title,
            prototype = %prototype,
            "prototype candidate does not mention topic name"
        );
    }
}

/// The page title for a file: the sole topic, or a leading Class, Section or
/// File topic, else the file's base name.
pub fn default_title(topics: &[Topic], file: &str) -> String {
    match topics {
        [only] => only.title.clone(),
        [first, ..] if !first.kind.is_list() && first.kind.topic_type().page_title_if_first() => {
            first.title.clone()
        }
        _ => Path::new(file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file)
            .to_string(),
    }
}
