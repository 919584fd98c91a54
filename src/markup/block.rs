//! Block-level formatting: paragraphs, headings, lists and code.

use regex::Regex;
use std::sync::LazyLock;

use super::escape::escape;
use super::inline::format_inline;
use crate::language::{TopicKind, TopicType};
use crate::parser::{is_code_end, is_code_start};

static RE_CODE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ *[>:|](.*)$").unwrap());

static RE_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*o+] +([^ ].*)$").unwrap());

static RE_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?) +- +([^ ].*)$").unwrap());

static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*[^ ]):$").unwrap());

/// Headings inside a list of functions under which entries are parameters, not symbols.
const PARAMETER_HEADINGS: &[&str] = &[
    "parameters",
    "parameter",
    "params",
    "param",
    "arguments",
    "argument",
    "args",
    "arg",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    None,
    Paragraph,
    BulletList,
    DescriptionList,
    PrefixCode,
    TaggedCode,
}

impl Block {
    fn ender(self) -> &'static str {
        match self {
            Block::None => "",
            Block::Paragraph => "</p>",
            Block::BulletList => "</li></ul>",
            Block::DescriptionList => "</dd></dl>",
            Block::PrefixCode | Block::TaggedCode => "</code>",
        }
    }

    fn is_code(self) -> bool {
        matches!(self, Block::PrefixCode | Block::TaggedCode)
    }
}

/// Converts cleaned comment lines into NDMarkup.
#[derive(Debug, Clone, Copy)]
pub struct MarkupFormatter {
    kind: TopicKind,
}

impl MarkupFormatter {
    /// Description list entries of list topics are emitted as `<ds>` symbol entries.
    pub fn new(kind: TopicKind) -> Self {
        Self { kind }
    }

    pub fn format<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let mut state = FormatState::new(self.kind);
        for line in lines {
            state.line(line.as_ref());
        }
        state.finish()
    }
}

/// Format `lines` as the body of a non-list topic.
pub fn format_body<S: AsRef<str>>(lines: &[S]) -> String {
    MarkupFormatter::new(TopicKind::Single(TopicType::Generic)).format(lines)
}

struct FormatState {
    kind: TopicKind,
    output: String,
    block: Block,
    text: Option<String>,
    code: Vec<String>,
    prev_blank: bool,
    code_blank_pending: bool,
    ignore_list_symbols: bool,
}

impl FormatState {
    fn new(kind: TopicKind) -> Self {
        Self {
            kind,
            output: String::new(),
            block: Block::None,
            text: None,
            code: Vec::new(),
            prev_blank: true,
            code_blank_pending: false,
            ignore_list_symbols: false,
        }
    }

    fn flush_text(&mut self) {
        if let Some(text) = self.text.take() {
            self.output.push_str(&format_inline(&text));
        }
    }

    fn close_block(&mut self) {
        if self.block.is_code() {
            self.close_code();
            return;
        }
        self.flush_text();
        self.output.push_str(self.block.ender());
        self.block = Block::None;
    }

    /// Emit the code block with its common indentation removed.
    fn close_code(&mut self) {
        let lines = std::mem::take(&mut self.code);
        let indent = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.len() - line.trim_start_matches(' ').len())
            .min()
            .unwrap_or(0);

        let mut code = String::new();
        for line in lines.iter().skip_while(|line| line.trim().is_empty()) {
            if !line.trim().is_empty() {
                code.push_str(line[indent..].trim_end());
            }
            code.push('\n');
        }
        let code = code.trim_end_matches('\n');

        self.output.push_str(&escape(code));
        self.output.push_str("</code>");
        self.block = Block::None;
        self.code_blank_pending = false;
    }

    fn is_symbol_list(&self) -> bool {
        self.kind.is_list() && !self.ignore_list_symbols
    }

    fn line(&mut self, line: &str) {
        if self.block == Block::TaggedCode {
            if is_code_end(line) {
                self.close_code();
                self.prev_blank = false;
            } else {
                self.code.push(line.to_string());
            }
            return;
        }

        if let Some(captures) = RE_CODE_LINE.captures(line) {
            let code = captures[1].to_string();
            if self.block == Block::PrefixCode {
                if self.code_blank_pending {
                    self.code.push(String::new());
                    self.code_blank_pending = false;
                }
            } else {
                self.close_block();
                self.block = Block::PrefixCode;
                self.output.push_str("<code type=\"anonymous\">");
            }
            self.code.push(code);
            return;
        }

        let line = line.trim_start_matches(' ');

        if self.block == Block::PrefixCode {
            // One blank line may separate two parts of the same code block.
            if line.is_empty() && !self.code_blank_pending {
                self.code_blank_pending = true;
                return;
            }
            let blank_before = self.code_blank_pending;
            self.close_code();
            self.prev_blank = blank_before;
        }

        if line.is_empty() {
            if self.block == Block::Paragraph {
                self.close_block();
            }
            self.prev_blank = true;
        } else if let Some(bullet) = RE_BULLET
            .captures(line)
            .map(|c| c[1].to_string())
            .filter(|text| !text.starts_with("- "))
        {
            self.flush_text();
            if self.block == Block::BulletList {
                self.output.push_str("</li><li>");
            } else {
                self.output.push_str(self.block.ender());
                self.output.push_str("<ul><li>");
                self.block = Block::BulletList;
            }
            self.text = Some(bullet);
            self.prev_blank = false;
        } else if let Some(captures) = RE_DEFINITION
            .captures(line)
            .filter(|_| self.block != Block::Paragraph)
        {
            self.flush_text();
            if self.block == Block::DescriptionList {
                self.output.push_str("</dd>");
            } else {
                self.output.push_str(self.block.ender());
                self.output.push_str("<dl>");
                self.block = Block::DescriptionList;
            }
            let tag = if self.is_symbol_list() { "ds" } else { "de" };
            self.output
                .push_str(&format!("<{tag}>{}</{tag}><dd>", escape(&captures[1])));
            self.text = Some(captures[2].to_string());
            self.prev_blank = false;
        } else if let Some(captures) = RE_HEADING.captures(line).filter(|_| self.prev_blank) {
            self.close_block();
            let heading = &captures[1];
            self.output.push_str("<h>");
            self.output.push_str(&format_inline(heading));
            self.output.push_str("</h>");
            if self.kind == TopicKind::List(TopicType::Function) {
                self.ignore_list_symbols =
                    PARAMETER_HEADINGS.contains(&heading.to_lowercase().as_str());
            }
            self.prev_blank = false;
        } else if is_code_start(line) {
            self.close_block();
            self.output.push_str("<code type=\"anonymous\">");
            self.block = Block::TaggedCode;
        } else {
            // A blank line followed by plain text ends a list.
            if self.prev_blank
                && matches!(self.block, Block::BulletList | Block::DescriptionList)
            {
                self.close_block();
            }
            if self.block == Block::None {
                self.output.push_str("<p>");
                self.block = Block::Paragraph;
            }
            let text = self.text.get_or_insert_with(String::new);
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(line);
            self.prev_blank = false;
        }
    }

    fn finish(mut self) -> String {
        self.close_block();
        self.output
    }
}
