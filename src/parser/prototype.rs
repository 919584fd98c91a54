//! Prototype capture: the code immediately following a comment.
//!
//! The scanner hands over the raw lines after a comment; this module finds
//! where the declaration ends according to the language's ender symbols.

use crate::language::PrototypeEnder;

/// Capture the raw prototype text from the lines following a comment.
///
/// Leading and interior blank lines are skipped. Line breaks escaped by
/// `extender` are joined before enders are searched. Enders inside `()` or
/// `[]` do not count. If no ender is ever found the remainder of the input is
/// the candidate.
pub fn capture_prototype(
    lines: &[&str],
    enders: &[PrototypeEnder],
    extender: Option<&str>,
) -> Option<String> {
    let line_break_ends = enders.contains(&PrototypeEnder::LineBreak);
    let symbols: Vec<&str> = enders
        .iter()
        .filter_map(|ender| match ender {
            PrototypeEnder::Symbol(symbol) if !symbol.is_empty() => Some(symbol.as_str()),
            _ => None,
        })
        .collect();

    let mut prototype = String::new();
    let mut depth = 0usize;

    for line in lines {
        let (text, escaped) = strip_extender(line.trim_end(), extender);
        if text.trim().is_empty() && !escaped {
            if prototype.is_empty() {
                continue;
            }
            // Interior blank lines are skipped, but a line-break ender still fires.
            if line_break_ends && depth == 0 {
                break;
            }
            continue;
        }

        if let Some(end) = find_ender(text, &symbols, &mut depth) {
            prototype.push_str(&text[..end]);
            return finish(prototype);
        }

        prototype.push_str(text);
        if escaped {
            prototype.push(' ');
            continue;
        }
        if line_break_ends && depth == 0 {
            return finish(prototype);
        }
        prototype.push('\n');
    }

    finish(prototype)
}

/// Collapse whitespace runs into single spaces and trim the ends.
pub fn normalize_prototype(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_extender<'a>(line: &'a str, extender: Option<&str>) -> (&'a str, bool) {
    match extender {
        Some(ext) if !ext.is_empty() => match line.strip_suffix(ext) {
            Some(stripped) => (stripped, true),
            None => (line, false),
        },
        _ => (line, false),
    }
}

/// Byte offset of the first ender at nesting depth zero.
fn find_ender(text: &str, symbols: &[&str], depth: &mut usize) -> Option<usize> {
    for (offset, c) in text.char_indices() {
        if *depth == 0 {
            let rest = &text[offset..];
            if symbols.iter().any(|symbol| rest.starts_with(symbol)) {
                return Some(offset);
            }
        }
        match c {
            '(' | '[' => *depth += 1,
            ')' | ']' => *depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

fn finish(prototype: String) -> Option<String> {
    let trimmed = prototype.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enders(symbols: &[&str]) -> Vec<PrototypeEnder> {
        symbols.iter().map(|s| PrototypeEnder::parse(s)).collect()
    }

    #[test]
    fn test_stops_at_first_ender() {
        let lines = ["int Add(int a, int b);", "int Other();"];
        let proto = capture_prototype(&lines, &enders(&[";", "{"]), None);
        assert_eq!(proto.as_deref(), Some("int Add(int a, int b)"));
    }

    #[test]
    fn test_spans_lines_until_ender() {
        let lines = ["void Draw(int x,", "          int y)", "{", "}"];
        let proto = capture_prototype(&lines, &enders(&[";", "{"]), None).unwrap();
        assert_eq!(normalize_prototype(&proto), "void Draw(int x, int y)");
    }

    #[test]
    fn test_enders_inside_parentheses_are_ignored() {
        let lines = ["for_each(items, fn(x) { x; })", "{"];
        let proto = capture_prototype(&lines, &enders(&["{"]), None);
        assert_eq!(proto.as_deref(), Some("for_each(items, fn(x) { x; })"));
    }

    #[test]
    fn test_no_ender_takes_remainder() {
        let lines = ["", "sub Foo", "  my $x = 1"];
        let proto = capture_prototype(&lines, &enders(&["{"]), None).unwrap();
        assert_eq!(normalize_prototype(&proto), "sub Foo my $x = 1");
    }

    #[test]
    fn test_line_break_ender_with_extender() {
        let lines = ["FOO=a \\", "  b", "BAR=c"];
        let proto = capture_prototype(&lines, &enders(&["\\n"]), Some("\\")).unwrap();
        assert_eq!(normalize_prototype(&proto), "FOO=a b");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(capture_prototype(&[], &enders(&[";"]), None), None);
        assert_eq!(capture_prototype(&["", "  "], &enders(&[";"]), None), None);
    }
}
