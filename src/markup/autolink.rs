//! Bare e-mail address and URL detection in running text.
//!
//! Matches are only accepted when they are not glued to surrounding word
//! characters and not already inside an explicit `<...>` link.

use regex::Regex;
use std::sync::LazyLock;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:mailto:)?((?:[a-z0-9\-_]+\.)*[a-z0-9\-_]+@(?:[a-z0-9\-]+\.)+[a-z]{2,4})")
        .unwrap()
});

static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:http|https|ftp|news|file):[a-z0-9\-=~@#%&_+/;:?*.,]*[a-z0-9\-=~@#%&_+/;:?*]",
    )
    .unwrap()
});

/// A span of running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Email {
        /// As written, including any `mailto:` prefix.
        original: &'a str,
        address: &'a str,
    },
    Url(&'a str),
}

impl<'a> Segment<'a> {
    /// The source text the segment was cut from.
    pub fn original(&self) -> &'a str {
        match *self {
            Segment::Text(text) | Segment::Url(text) => text,
            Segment::Email { original, .. } => original,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Found<'a> {
    start: usize,
    end: usize,
    segment: Segment<'a>,
}

/// Split `text` into plain text and autolinked segments, in order.
pub fn find_autolinks(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;

    while plain_start < text.len() {
        let found = match (next_email(text, plain_start), next_url(text, plain_start)) {
            (Some(email), Some(url)) if url.start <= email.start => url,
            (Some(email), _) => email,
            (None, Some(url)) => url,
            (None, None) => break,
        };
        if found.start > plain_start {
            segments.push(Segment::Text(&text[plain_start..found.start]));
        }
        segments.push(found.segment);
        plain_start = found.end;
    }

    if plain_start < text.len() {
        segments.push(Segment::Text(&text[plain_start..]));
    }
    segments
}

fn next_email(text: &str, mut from: usize) -> Option<Found<'_>> {
    while let Some(captures) = RE_EMAIL.captures_at(text, from) {
        let whole = captures.get(0)?;
        let address = captures.get(1)?;
        let next = text[whole.end()..].chars().next();
        let glued = next.is_some_and(|c| is_word_char(c) || c == '>');
        if can_start_at(text, whole.start()) && !glued {
            return Some(Found {
                start: whole.start(),
                end: whole.end(),
                segment: Segment::Email {
                    original: whole.as_str(),
                    address: address.as_str(),
                },
            });
        }
        from = next_boundary(text, whole.start());
    }
    None
}

fn next_url(text: &str, mut from: usize) -> Option<Found<'_>> {
    while let Some(whole) = RE_URL.find_at(text, from) {
        let mut rest = text[whole.end()..].chars();
        let blocked = match rest.next() {
            Some('.') => rest.next().is_some_and(is_url_char_or_close),
            Some(c) => is_url_char_or_close(c),
            None => false,
        };
        if can_start_at(text, whole.start()) && !blocked {
            return Some(Found {
                start: whole.start(),
                end: whole.end(),
                segment: Segment::Url(whole.as_str()),
            });
        }
        from = next_boundary(text, whole.start());
    }
    None
}

/// The previous character must not be a word character or `<`.
fn can_start_at(text: &str, start: usize) -> bool {
    !text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| is_word_char(c) || c == '<')
}

fn is_word_char(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

fn is_url_char_or_close(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-=~@#%&_+/;:?*>".contains(c)
}

fn next_boundary(text: &str, index: usize) -> usize {
    index + text[index..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_email() {
        let segments = find_autolinks("Mail me at someone@example.com today.");
        assert_eq!(
            segments,
            vec![
                Segment::Text("Mail me at "),
                Segment::Email {
                    original: "someone@example.com",
                    address: "someone@example.com"
                },
                Segment::Text(" today."),
            ]
        );
    }

    #[test]
    fn test_mailto_prefix_dropped_from_address() {
        let segments = find_autolinks("mailto:a.b@c.org");
        assert_eq!(
            segments,
            vec![Segment::Email {
                original: "mailto:a.b@c.org",
                address: "a.b@c.org"
            }]
        );
    }

    #[test]
    fn test_url_trailing_punctuation_excluded() {
        let segments = find_autolinks("See http://example.com/a_b, or not.");
        assert_eq!(segments[1], Segment::Url("http://example.com/a_b"));
        assert_eq!(segments[2], Segment::Text(", or not."));
    }

    #[test]
    fn test_url_wins_over_embedded_email() {
        let segments = find_autolinks("ftp://user@host.com/file");
        assert_eq!(segments, vec![Segment::Url("ftp://user@host.com/file")]);
    }

    #[test]
    fn test_bracketed_links_left_alone() {
        let segments = find_autolinks("<http://example.com>");
        assert_eq!(segments, vec![Segment::Text("<http://example.com>")]);
    }

    #[test]
    fn test_glued_to_word_rejected() {
        assert_eq!(find_autolinks("xhttp://a.com"), vec![Segment::Text("xhttp://a.com")]);
    }
}
