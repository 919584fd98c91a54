//! Comment scanner: raw source text → raw comment blocks.
//!
//! Only comments that start their own line are considered; trailing comments
//! after code are part of the code. Comment markers are replaced by spaces so
//! columns (and therefore code indentation inside comments) are preserved.

use text_size::TextSize;
use tracing::debug;

use super::prototype::capture_prototype;
use crate::base::LineSpan;
use crate::language::{LanguageSpec, TopicSynonyms};

/// One comment block with its markers blanked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    /// Comment lines, markers replaced by spaces.
    pub lines: Vec<String>,
    /// Source lines covered by the comment (1-based).
    pub span: LineSpan,
    /// Byte offset of the first comment line.
    pub offset: TextSize,
    /// Raw text following the comment that may be a prototype.
    pub prototype: Option<String>,
    /// Block opener blanked out of the first line, if the comment is a block.
    pub opener: Option<String>,
}

impl RawComment {
    /// 1-based line number of the first comment line.
    pub fn line_number(&self) -> usize {
        self.span.start
    }
}

/// A source line with its starting byte offset.
#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    offset: TextSize,
    text: &'a str,
}

/// Lazy iterator over the comments of one file.
pub struct CommentScanner<'a> {
    lines: Vec<SourceLine<'a>>,
    next_line: usize,
    language: &'a LanguageSpec,
    synonyms: &'a TopicSynonyms,
    whole_file_pending: bool,
}

impl<'a> CommentScanner<'a> {
    pub fn new(source: &'a str, language: &'a LanguageSpec, synonyms: &'a TopicSynonyms) -> Self {
        let mut lines = Vec::new();
        let mut offset = 0u32;
        for chunk in source.split_inclusive('\n') {
            let text = chunk.trim_end_matches('\n').trim_end_matches('\r');
            lines.push(SourceLine {
                offset: TextSize::new(offset),
                text,
            });
            offset += chunk.len() as u32;
        }

        Self {
            lines,
            next_line: 0,
            language,
            synonyms,
            whole_file_pending: language.treats_whole_file_as_comment(),
        }
    }

    fn whole_file(&mut self) -> Option<RawComment> {
        self.whole_file_pending = false;
        self.next_line = self.lines.len();
        if self.lines.is_empty() {
            return None;
        }
        Some(RawComment {
            lines: self.lines.iter().map(|l| l.text.to_string()).collect(),
            span: LineSpan::from_count(1, self.lines.len()),
            offset: TextSize::new(0),
            prototype: None,
            opener: None,
        })
    }

    /// Opening block marker at the start of `text` (after indentation), longest first.
    fn block_opener(&self, text: &str) -> Option<(usize, &'a (String, String))> {
        let language: &'a LanguageSpec = self.language;
        let indent = indentation(text);
        let rest = &text[indent..];
        language
            .block_comment_markers
            .iter()
            .filter(|(open, _)| !open.is_empty() && rest.starts_with(open.as_str()))
            .max_by_key(|(open, _)| open.len())
            .map(|markers| (indent, markers))
    }

    /// Line comment marker at the start of `text` (after indentation), longest first.
    fn line_marker(&self, text: &str) -> Option<(usize, &'a str)> {
        let language: &'a LanguageSpec = self.language;
        let indent = indentation(text);
        let rest = &text[indent..];
        language
            .line_comment_markers
            .iter()
            .filter(|marker| !marker.is_empty() && rest.starts_with(marker.as_str()))
            .max_by_key(|marker| marker.len())
            .map(|marker| (indent, marker.as_str()))
    }

    /// Whether `text` starts a block comment whose opener beats any line marker.
    fn starts_block(&self, text: &str) -> bool {
        match (self.block_opener(text), self.line_marker(text)) {
            (Some((_, (open, _))), Some((_, marker))) => open.len() >= marker.len(),
            (Some(_), None) => true,
            _ => false,
        }
    }

    fn scan_line_comment(&self, first: usize) -> (Vec<String>, usize) {
        let mut lines = Vec::new();
        let mut index = first;
        while index < self.lines.len() {
            let text = self.lines[index].text;
            if self.starts_block(text) {
                break;
            }
            let Some((indent, marker)) = self.line_marker(text) else {
                break;
            };
            lines.push(blank_out(text, indent, marker.len()));
            index += 1;
        }
        // The prototype may start right on the next line.
        (lines, index)
    }

    fn scan_block_comment(&self, first: usize) -> (Vec<String>, usize, Option<&'a str>) {
        let Some((indent, (open, close))) = self.block_opener(self.lines[first].text) else {
            return (Vec::new(), first + 1, None);
        };

        let mut lines = Vec::new();
        let mut index = first;
        let mut search_from = indent + open.len();
        let mut line = blank_out(self.lines[first].text, indent, open.len());

        loop {
            let source = self.lines[index].text;
            let found = source
                .get(search_from..)
                .and_then(|rest| rest.find(close.as_str()));
            if let Some(found) = found {
                let end = search_from + found;
                let mut kept = line[..end].to_string();
                kept.push_str(&" ".repeat(close.len()));
                lines.push(kept.trim_end().to_string());
                let trailing = source[end + close.len()..].trim();
                let trailing = (!trailing.is_empty()).then_some(trailing);
                return (lines, index + 1, trailing);
            }

            lines.push(line);
            index += 1;
            if index >= self.lines.len() {
                debug!(
                    line = first + 1,
                    "unterminated block comment runs to end of file"
                );
                return (lines, index, None);
            }
            line = self.lines[index].text.to_string();
            search_from = 0;
        }
    }

    /// The kind of the comment's sole header decides whether a prototype is captured.
    fn prototype_for(
        &self,
        comment: &[String],
        after: usize,
        trailing: Option<&str>,
    ) -> Option<String> {
        let mut header = None;
        let mut prev_blank = true;
        for line in comment {
            let text = strip_left_edge(line);
            if text.is_empty() {
                prev_blank = true;
                continue;
            }
            if prev_blank {
                if let Some(found) = self.synonyms.parse_header(text) {
                    if header.is_some() {
                        return None;
                    }
                    header = Some(found.kind);
                }
            }
            prev_blank = false;
        }

        let kind = header?;
        if !kind.takes_prototype() {
            return None;
        }
        let enders = self.language.prototype_enders(kind.topic_type())?;

        let mut following: Vec<&str> = Vec::new();
        if let Some(trailing) = trailing {
            following.push(trailing);
        }
        following.extend(self.lines[after..].iter().map(|l| l.text));
        capture_prototype(&following, enders, self.language.line_extender.as_deref())
    }
}

impl<'a> Iterator for CommentScanner<'a> {
    type Item = RawComment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.whole_file_pending {
            return self.whole_file();
        }

        while self.next_line < self.lines.len() {
            let first = self.next_line;
            let text = self.lines[first].text;

            let (lines, after, trailing, opener) = if self.starts_block(text) {
                let opener = self.block_opener(text).map(|(_, (open, _))| open.clone());
                let (lines, after, trailing) = self.scan_block_comment(first);
                (lines, after, trailing, opener)
            } else if self.line_marker(text).is_some() {
                let (lines, after) = self.scan_line_comment(first);
                (lines, after, None, None)
            } else {
                self.next_line += 1;
                continue;
            };

            self.next_line = after.max(first + 1);
            let prototype = self.prototype_for(&lines, after, trailing);
            return Some(RawComment {
                span: LineSpan::from_count(first + 1, lines.len()),
                offset: self.lines[first].offset,
                lines,
                prototype,
                opener,
            });
        }

        None
    }
}

/// Scan a whole file eagerly.
pub fn scan_comments(
    source: &str,
    language: &LanguageSpec,
    synonyms: &TopicSynonyms,
) -> Vec<RawComment> {
    CommentScanner::new(source, language, synonyms).collect()
}

fn indentation(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t']).len()
}

/// Replace `len` bytes at `start` with spaces.
fn blank_out(text: &str, start: usize, len: usize) -> String {
    let mut line = String::with_capacity(text.len());
    line.push_str(&text[..start]);
    line.push_str(&" ".repeat(len));
    line.push_str(&text[start + len..]);
    line.trim_end().to_string()
}

/// Strip indentation and a leading run of one decoration symbol (`*`, `#`, ...).
fn strip_left_edge(line: &str) -> &str {
    let text = line.trim_start();
    let Some(first) = text.chars().next() else {
        return text;
    };
    if first.is_alphanumeric() {
        return text;
    }
    let rest = text.trim_start_matches(first);
    if rest.is_empty() || rest.starts_with(' ') {
        rest.trim_start()
    } else {
        text
    }
}
