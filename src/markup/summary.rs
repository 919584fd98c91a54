//! Queries over formatted NDMarkup bodies.

use regex::Regex;
use std::sync::LazyLock;

use super::escape::unescape;

static RE_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:<h>[^<]*</h>)?<p>(.*?)(</p>|[.!?](?:[)}' ]|&quot;|&gt;))"#).unwrap()
});

static RE_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(.*?)($|[.!?](?:[)}' ]|&quot;|&gt;))"#).unwrap());

static RE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<link target="([^"]*)" name="[^"]*" original="[^"]*">"#).unwrap()
});

static RE_SYMBOL_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<ds>([^<]*)</ds><dd>(.*?)</dd>").unwrap());

/// One `<ds>` entry of a list topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    /// Unescaped entry name.
    pub name: String,
    /// First sentence of the entry's description, as NDMarkup.
    pub summary: Option<String>,
}

/// First sentence of the leading paragraph. A single heading before it is tolerated.
pub fn summary(body: &str) -> Option<String> {
    let captures = RE_SUMMARY.captures(body)?;
    let mut summary = captures[1].to_string();
    if &captures[2] != "</p>" {
        summary.push_str(&captures[2]);
    }
    let summary = summary.trim_end();
    (!summary.is_empty()).then(|| summary.to_string())
}

fn description_summary(description: &str) -> Option<String> {
    let captures = RE_SENTENCE.captures(description)?;
    let summary = format!("{}{}", &captures[1], &captures[2]);
    let summary = summary.trim_end();
    (!summary.is_empty()).then(|| summary.to_string())
}

/// Targets of every `<link>` in `body`, unescaped, in order.
pub fn link_targets(body: &str) -> Vec<String> {
    RE_LINK
        .captures_iter(body)
        .map(|captures| unescape(&captures[1]))
        .collect()
}

/// Symbol entries of a list topic body.
pub fn symbol_entries(body: &str) -> Vec<SymbolEntry> {
    RE_SYMBOL_ENTRY
        .captures_iter(body)
        .map(|captures| SymbolEntry {
            name: unescape(&captures[1]),
            summary: description_summary(&captures[2]),
        })
        .collect()
}
