//! Comment cleaner: tab expansion, box and rule stripping.
//!
//! Decorative boxes are only removed when the same symbol runs down the whole
//! left (or right) edge of the comment. The edge can only be confirmed after
//! the last line, so cleaning is one classification pass followed by one
//! stripping pass.

use super::code_section::{is_code_end, is_code_start};
use crate::base::Settings;

/// Uniformity of one comment edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeState {
    Unknown,
    Uniform(char),
    /// Uniform so far, but a blank line followed; only acceptable if nothing
    /// but blank lines come after.
    UniformIfAtEnd(char),
    Broken,
}

impl EdgeState {
    fn after_blank_line(self) -> Self {
        match self {
            EdgeState::Uniform(c) => EdgeState::UniformIfAtEnd(c),
            other => other,
        }
    }

    fn after_content(self) -> Self {
        match self {
            EdgeState::UniformIfAtEnd(_) => EdgeState::Broken,
            other => other,
        }
    }

    fn observe(self, symbol: Option<char>) -> Self {
        match (self, symbol) {
            (EdgeState::Broken, _) => EdgeState::Broken,
            (EdgeState::Unknown, Some(c)) => EdgeState::Uniform(c),
            (EdgeState::Uniform(expected), Some(c)) if expected == c => self,
            _ => EdgeState::Broken,
        }
    }

    fn finish(self) -> Self {
        match self {
            EdgeState::UniformIfAtEnd(c) => EdgeState::Uniform(c),
            other => other,
        }
    }

    fn is_uniform(self) -> bool {
        matches!(self, EdgeState::Uniform(_))
    }
}

/// Normalizes the lines of one raw comment.
#[derive(Debug, Clone, Copy)]
pub struct CommentCleaner {
    tab_width: usize,
    /// Edge symbol the blanked block opener stood in for on the first line.
    opener_edge: Option<char>,
}

impl Default for CommentCleaner {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl CommentCleaner {
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
            opener_edge: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tab_width)
    }

    /// Clean a block comment whose first line began with `opener`.
    ///
    /// The first line may then lack the left edge symbol, provided the edge
    /// is the opener's own symbol (`*` for `/*`).
    pub fn after_opener(mut self, opener: &str) -> Self {
        self.opener_edge = opener.chars().next_back().filter(|c| is_symbol(*c));
        self
    }

    /// Clean in place, keeping one line per input line.
    pub fn clean(&self, lines: &mut [String]) {
        let mut left = EdgeState::Unknown;
        let mut right = EdgeState::Unknown;
        let mut first_unmarked = false;

        for (index, line) in lines.iter_mut().enumerate() {
            *line = expand_tabs(line.trim_end(), self.tab_width);
            let text = line.trim_start_matches(' ');

            if text.is_empty() {
                left = left.after_blank_line();
                right = right.after_blank_line();
            } else if is_horizontal_rule(text) {
                // Rules have no effect on edge detection.
            } else {
                left = left.after_content();
                right = right.after_content();

                if left != EdgeState::Broken {
                    match left_edge_symbol(text) {
                        Some(c) => left = left.observe(Some(c)),
                        None if index == 0 && self.opener_edge.is_some() => {
                            first_unmarked = true;
                        }
                        None => left = EdgeState::Broken,
                    }
                }
                if right != EdgeState::Broken {
                    right = right.observe(right_edge_symbol(text));
                }
            }
        }

        let left = match left.finish() {
            EdgeState::Uniform(c) if first_unmarked && self.opener_edge != Some(c) => {
                EdgeState::Broken
            }
            other => other,
        };
        let right = right.finish();
        let mut in_code = false;

        for line in lines.iter_mut() {
            if is_horizontal_rule(line.trim_start_matches(' ')) {
                if !in_code {
                    line.clear();
                }
                continue;
            }

            if left.is_uniform() {
                strip_left_edge(line);
            }
            if right.is_uniform() {
                strip_right_edge(line);
            }
            if (left.is_uniform() || right.is_uniform())
                && is_horizontal_rule(line.trim_start_matches(' '))
                && !in_code
            {
                line.clear();
            }

            if !in_code && is_code_start(line) {
                in_code = true;
            } else if in_code && is_code_end(line) {
                in_code = false;
            }
        }
    }

    /// Clean, then drop leading and trailing blank lines and collapse blank
    /// runs outside code sections. Line positions are not preserved; see
    /// [`clean_compact_indexed`](Self::clean_compact_indexed).
    pub fn clean_compact(&self, lines: Vec<String>) -> Vec<String> {
        self.clean_compact_indexed(lines)
            .into_iter()
            .map(|(_, line)| line)
            .collect()
    }

    /// As [`clean_compact`](Self::clean_compact), pairing each kept line with
    /// its index in the input.
    pub fn clean_compact_indexed(&self, mut lines: Vec<String>) -> Vec<(usize, String)> {
        self.clean(&mut lines);

        let mut output: Vec<(usize, String)> = Vec::with_capacity(lines.len());
        let mut in_code = false;
        for (index, line) in lines.into_iter().enumerate() {
            if line.is_empty()
                && !in_code
                && output.last().is_none_or(|(_, last)| last.is_empty())
            {
                continue;
            }
            if !in_code && is_code_start(&line) {
                in_code = true;
            } else if in_code && is_code_end(&line) {
                in_code = false;
            }
            output.push((index, line));
        }
        while output.last().is_some_and(|(_, last)| last.is_empty()) {
            output.pop();
        }
        output
    }
}

/// Expand tabs to the next multiple of `width`.
pub fn expand_tabs(line: &str, width: usize) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut output = String::with_capacity(line.len() + width);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let spaces = width - (column % width);
            output.extend(std::iter::repeat_n(' ', spaces));
            column += spaces;
        } else {
            output.push(c);
            column += 1;
        }
    }
    output
}

fn is_symbol(c: char) -> bool {
    !c.is_alphanumeric() && c != ' '
}

/// Maximal runs of identical characters.
fn runs(text: &str) -> Vec<(char, usize)> {
    let mut runs: Vec<(char, usize)> = Vec::new();
    for c in text.chars() {
        match runs.last_mut() {
            Some((last, count)) if *last == c => *count += 1,
            _ => runs.push((c, 1)),
        }
    }
    runs
}

/// A line made only of symbols: one symbol repeated at least four times, two
/// symbols alternating for at least four characters, or a run of four or
/// more capped by different edge symbols (`+-----+`).
pub fn is_horizontal_rule(text: &str) -> bool {
    let text = text.trim_end();
    if text.chars().count() < 4 || !text.chars().all(is_symbol) {
        return false;
    }

    let runs = runs(text);
    match runs.as_slice() {
        [(_, n)] => *n >= 4,
        [(_, a), (_, b)] => *a >= 4 || *b >= 4,
        [_, (_, middle), _] => *middle >= 4,
        _ => {
            // "-=-=-=" style: exactly two distinct symbols strictly alternating.
            let first = runs[0].0;
            let second = runs[1].0;
            runs.iter().all(|(_, n)| *n == 1)
                && runs
                    .iter()
                    .enumerate()
                    .all(|(i, (c, _))| *c == if i % 2 == 0 { first } else { second })
        }
    }
}

/// The symbol of a leading run followed by a space or the end of the line.
fn left_edge_symbol(text: &str) -> Option<char> {
    let first = text.chars().next()?;
    if !is_symbol(first) {
        return None;
    }
    let rest = text.trim_start_matches(first);
    (rest.is_empty() || rest.starts_with(' ')).then_some(first)
}

/// The symbol of a trailing run preceded by a space.
fn right_edge_symbol(text: &str) -> Option<char> {
    let last = text.chars().next_back()?;
    if !is_symbol(last) {
        return None;
    }
    let rest = text.trim_end_matches(last);
    rest.ends_with(' ').then_some(last)
}

fn strip_left_edge(line: &mut String) {
    let text = line.trim_start_matches(' ');
    if let Some(c) = text.chars().next().filter(|c| is_symbol(*c)) {
        *line = text.trim_start_matches(c).to_string();
    }
}

fn strip_right_edge(line: &mut String) {
    let Some(c) = line.chars().next_back().filter(|c| is_symbol(*c)) else {
        return;
    };
    let stripped = line.trim_end_matches(c).trim_end_matches(' ');
    *line = stripped.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn clean(lines: &[&str]) -> Vec<String> {
        let mut lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        CommentCleaner::new(4).clean(&mut lines);
        lines
    }

    #[test]
    fn test_box_of_hashes_is_removed() {
        let cleaned = clean(&[
            "# Function: Foo #",
            "#               #",
            "# Does things.  #",
        ]);
        assert_eq!(cleaned, vec![" Function: Foo", "", " Does things."]);
    }

    #[test]
    fn test_standalone_rule_becomes_blank() {
        let cleaned = clean(&["  Function: Foo", "  -----", "  Text."]);
        assert_eq!(cleaned, vec!["  Function: Foo", "", "  Text."]);
    }

    fn clean_block(lines: &[&str]) -> Vec<String> {
        let mut lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        CommentCleaner::new(4).after_opener("/*").clean(&mut lines);
        lines
    }

    #[test]
    fn test_javadoc_star_column() {
        let cleaned = clean_block(&["   Function: Add", " * Adds two numbers.", " *", ""]);
        assert_eq!(cleaned, vec!["   Function: Add", " Adds two numbers.", "", ""]);
    }

    #[test]
    fn test_first_line_needs_edge_without_opener() {
        let input = ["   Function: Add", " * Adds two numbers.", " *"];
        assert_eq!(clean(&input), vec!["   Function: Add", " * Adds two numbers.", " *"]);
    }

    #[rstest]
    #[case(&["  Function: Foo", "", "  - first", "  - second"])]
    #[case(&["  Function: Foo", "", "  > x = 1;", "  > y = 2;"])]
    fn test_bullets_and_code_after_header_are_kept(#[case] input: &[&str]) {
        assert_eq!(clean(input), input.to_vec());
        assert_eq!(clean_block(input), input.to_vec());
    }

    #[test]
    fn test_blank_line_inside_breaks_edge() {
        // The edge resumes after a blank line, so it is not a box.
        let cleaned = clean(&["* one", "", "* two"]);
        assert_eq!(cleaned, vec!["* one", "", "* two"]);
    }

    #[test]
    fn test_trailing_blank_lines_tolerated() {
        let cleaned = clean(&["| a", "| b", "", ""]);
        assert_eq!(cleaned, vec![" a", " b", "", ""]);
    }

    #[test]
    fn test_mixed_edge_is_not_a_box() {
        let cleaned = clean(&["# a", "* b"]);
        assert_eq!(cleaned, vec!["# a", "* b"]);
    }

    #[test]
    fn test_rules_kept_inside_code_sections() {
        let cleaned = clean(&["(code)", "-----", "(end)", "====="]);
        assert_eq!(cleaned, vec!["(code)", "-----", "(end)", ""]);
    }

    #[test]
    fn test_tabs_expanded() {
        let cleaned = clean(&["\tcode\tx"]);
        assert_eq!(cleaned, vec!["    code    x"]);
    }

    #[test]
    fn test_cleaning_is_deterministic() {
        let input = ["/***********", " * Class: Foo", " *", " * Text with *bold*.", " ***********/"];
        assert_eq!(clean(&input), clean(&input));
    }

    #[test]
    fn test_compact_collapses_blank_runs() {
        let lines = vec!["", "a", "", "", "b", "", ""]
            .into_iter()
            .map(String::from)
            .collect();
        let compact = CommentCleaner::new(4).clean_compact(lines);
        assert_eq!(compact, vec!["a", "", "b"]);
    }

    #[test]
    fn test_compact_keeps_input_positions() {
        let lines = vec!["", "", "a", "", "", "b"]
            .into_iter()
            .map(String::from)
            .collect();
        let compact = CommentCleaner::new(4).clean_compact_indexed(lines);
        let positions: Vec<usize> = compact.iter().map(|(index, _)| *index).collect();
        assert_eq!(positions, vec![2, 3, 5]);
    }

    #[rstest]
    #[case("----", true)]
    #[case("-=-=-=", true)]
    #[case("+------+", true)]
    #[case("/*******", true)]
    #[case("---", false)]
    #[case("-- text --", false)]
    #[case("-=+-", false)]
    fn test_horizontal_rule(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_horizontal_rule(text), expected);
    }
}
