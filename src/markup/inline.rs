//! Inline formatting: bold, underline, links.
//!
//! Text is cut at `* _ < >`. Whether a cut character opens or closes a tag
//! depends on its neighbours, and an opening tag is only realized when a
//! matching closing tag exists further on. Anything that fails to pair up is
//! emitted as literal (escaped) text.

use regex::Regex;
use std::sync::LazyLock;

use super::autolink::{Segment, find_autolinks};
use super::escape::escape;
use super::lexer::{InlineToken, tokenize};

static RE_LINK_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:mailto:)?((?:[a-z0-9\-_]+\.)*[a-z0-9\-_]+@(?:[a-z0-9\-]+\.)+[a-z]{2,4})$")
        .unwrap()
});

static RE_LINK_NAMED_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(.+?) at (?:mailto:)?((?:[a-z0-9\-_]+\.)*[a-z0-9\-_]+@(?:[a-z0-9\-]+\.)+[a-z]{2,4})$",
    )
    .unwrap()
});

static RE_LINK_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^[a-z]+:").unwrap());

static RE_LINK_NAMED_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?) at ([a-z]+:.+)$").unwrap());

// ============================================================================
// PIECES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Star,
    Underscore,
    Open,
    Close,
}

#[derive(Debug, Clone, Copy)]
enum Piece<'a> {
    Mark(Mark),
    Text(&'a str),
    Email { original: &'a str, address: &'a str },
    Url(&'a str),
}

impl<'a> Piece<'a> {
    fn text(&self) -> &'a str {
        match *self {
            Piece::Mark(Mark::Star) => "*",
            Piece::Mark(Mark::Underscore) => "_",
            Piece::Mark(Mark::Open) => "<",
            Piece::Mark(Mark::Close) => ">",
            Piece::Text(text) | Piece::Url(text) => text,
            Piece::Email { original, .. } => original,
        }
    }

    fn is(&self, mark: Mark) -> bool {
        matches!(self, Piece::Mark(m) if *m == mark)
    }
}

fn pieces(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    for segment in find_autolinks(text) {
        match segment {
            Segment::Text(text) => {
                pieces.extend(tokenize(text).into_iter().map(|(token, slice)| match token {
                    InlineToken::Star => Piece::Mark(Mark::Star),
                    InlineToken::Underscore => Piece::Mark(Mark::Underscore),
                    InlineToken::Open => Piece::Mark(Mark::Open),
                    InlineToken::Close => Piece::Mark(Mark::Close),
                    InlineToken::Text => Piece::Text(slice),
                }))
            }
            Segment::Email { original, address } => pieces.push(Piece::Email { original, address }),
            Segment::Url(url) => pieces.push(Piece::Url(url)),
        }
    }
    pieces
}

// ============================================================================
// TAG MATCHING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagType {
    Opening,
    Closing,
    NotATag,
}

fn ends_with_any(text: &str, set: &str) -> bool {
    text.chars().next_back().is_some_and(|c| set.contains(c))
}

fn starts_with_any(text: &str, set: &str) -> bool {
    text.chars().next().is_some_and(|c| set.contains(c))
}

fn tag_type(pieces: &[Piece<'_>], index: usize) -> TagType {
    let Piece::Mark(mark) = pieces[index] else {
        return TagType::NotATag;
    };
    let before = index.checked_sub(1).map(|i| pieces[i].text());
    let after = pieces.get(index + 1).map(Piece::text);

    let opening = mark != Mark::Close
        && before.is_none_or(|b| ends_with_any(b, " \t\n({[\"'-/*_"))
        && after.is_some_and(|a| !starts_with_any(a, " \t\n"))
        && (mark != Mark::Open || after.is_some_and(|a| !starts_with_any(a, "<=-")))
        && (mark != Mark::Star || after.is_some_and(|a| !starts_with_any(a, "=*")))
        && (mark == Mark::Open || before.is_none_or(|b| !ends_with_any(b, "*_")));
    if opening {
        return TagType::Opening;
    }

    let closing = mark != Mark::Open
        && after.is_none_or(|a| {
            starts_with_any(a, " \t\n)]}.,!?\"';:-/*_")
                || (mark == Mark::Close
                    && (a.starts_with("es") || a.starts_with('s') || a.starts_with('\'')))
        })
        && before.is_some_and(|b| !ends_with_any(b, " \t\n"))
        && (mark != Mark::Close || before.is_some_and(|b| !ends_with_any(b, ">=-")))
        && (mark == Mark::Close || before.is_none_or(|b| !ends_with_any(b, "*_")));
    if closing {
        TagType::Closing
    } else {
        TagType::NotATag
    }
}

/// Index of the tag closing the one opened at `start`, and whether the text
/// in between contains whitespace.
fn closing_tag(pieces: &[Piece<'_>], start: usize) -> Option<(usize, bool)> {
    let closing = match pieces[start] {
        Piece::Mark(Mark::Star) => Mark::Star,
        Piece::Mark(Mark::Underscore) => Mark::Underscore,
        Piece::Mark(Mark::Open) => Mark::Close,
        _ => return None,
    };

    let mut has_whitespace = false;
    let mut index = start + 1;
    while index < pieces.len() {
        let piece = pieces[index];
        if piece.is(Mark::Open) && tag_type(pieces, index) == TagType::Opening {
            // A second `<` means the first one was literal.
            if closing == Mark::Close {
                return None;
            }
            // Formatting tags cannot appear inside a link, so skip over it.
            if let Some((end, link_whitespace)) = closing_tag(pieces, index) {
                has_whitespace |= link_whitespace;
                index = end;
            }
        } else if piece.is(closing) {
            match tag_type(pieces, index) {
                TagType::Closing if index == start + 1 => return None,
                TagType::Closing => return Some((index, has_whitespace)),
                TagType::Opening => return None,
                TagType::NotATag => {}
            }
        } else if piece.text().contains([' ', '\t', '\n']) {
            has_whitespace = true;
        }
        index += 1;
    }
    None
}

// ============================================================================
// OUTPUT
// ============================================================================

/// The NDMarkup tag for the contents of an explicit `<...>` link.
fn link_tag(text: &str) -> String {
    if let Some(captures) = RE_LINK_EMAIL.captures(text) {
        let address = escape(&captures[1]);
        format!("<email target=\"{address}\" name=\"{address}\">")
    } else if let Some(captures) = RE_LINK_NAMED_EMAIL.captures(text) {
        format!(
            "<email target=\"{}\" name=\"{}\">",
            escape(&captures[2]),
            escape(&captures[1])
        )
    } else if RE_LINK_URL.is_match(text) {
        let url = escape(text);
        format!("<url target=\"{url}\" name=\"{url}\">")
    } else if let Some(captures) = RE_LINK_NAMED_URL.captures(text) {
        format!(
            "<url target=\"{}\" name=\"{}\">",
            escape(&captures[2]),
            escape(&captures[1])
        )
    } else {
        let target = escape(text);
        format!("<link target=\"{target}\" name=\"{target}\" original=\"&lt;{target}&gt;\">")
    }
}

/// Format one run of paragraph text into inline NDMarkup.
pub fn format_inline(text: &str) -> String {
    let pieces = pieces(text);
    let mut output = String::with_capacity(text.len() + text.len() / 4);
    let mut bold = false;
    // Some(has_whitespace) while an underline is open.
    let mut underline: Option<bool> = None;

    let mut index = 0;
    while index < pieces.len() {
        match pieces[index] {
            Piece::Mark(Mark::Open) => {
                let end = match tag_type(&pieces, index) {
                    TagType::Opening => closing_tag(&pieces, index),
                    _ => None,
                };
                match end {
                    Some((end, _)) => {
                        let target: String =
                            pieces[index + 1..end].iter().map(Piece::text).collect();
                        output.push_str(&link_tag(&target));
                        index = end;
                    }
                    None => output.push_str("&lt;"),
                }
            }
            Piece::Mark(Mark::Close) => output.push_str("&gt;"),
            Piece::Mark(Mark::Star) => {
                let tag = tag_type(&pieces, index);
                if tag == TagType::Opening && closing_tag(&pieces, index).is_some() {
                    bold = true;
                    output.push_str("<b>");
                } else if bold && tag == TagType::Closing {
                    bold = false;
                    output.push_str("</b>");
                } else {
                    output.push('*');
                }
            }
            Piece::Mark(Mark::Underscore) => {
                let tag = tag_type(&pieces, index);
                let closing = match tag {
                    TagType::Opening => closing_tag(&pieces, index),
                    _ => None,
                };
                if let Some((_, has_whitespace)) = closing {
                    underline = Some(has_whitespace);
                    output.push_str("<u>");
                } else if underline.is_some() && tag == TagType::Closing {
                    underline = None;
                    output.push_str("</u>");
                } else if underline == Some(false) {
                    // _some_underlined_text_ reads as "some underlined text".
                    output.push(' ');
                } else {
                    output.push('_');
                }
            }
            Piece::Text(text) => output.push_str(&escape(text)),
            Piece::Email { address, .. } => {
                let address = escape(address);
                output.push_str(&format!("<email target=\"{address}\" name=\"{address}\">"));
            }
            Piece::Url(url) => {
                let url = escape(url);
                output.push_str(&format!("<url target=\"{url}\" name=\"{url}\">"));
            }
        }
        index += 1;
    }
    output
}
