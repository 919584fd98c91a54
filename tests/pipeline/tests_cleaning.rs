//! Comment cleaning seen through the public API and the whole pipeline.

use ndoc::parser::CommentCleaner;
use ndoc::project::{SourceFile, parse_source};
use ndoc::{Settings, TopicSynonyms};
use rstest::rstest;

use crate::support::{c_language, shell_language};

fn clean(lines: &[&str]) -> Vec<String> {
    let mut lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
    CommentCleaner::default().clean(&mut lines);
    lines
}

#[test]
fn test_cleaning_cleaned_comment_changes_nothing() {
    let once = clean(&["# Function: Foo #", "#               #", "# Does things.  #"]);
    let refs: Vec<&str> = once.iter().map(String::as_str).collect();
    assert_eq!(clean(&refs), once);
}

#[test]
fn test_reparsing_unchanged_file_is_identical() {
    let language = c_language();
    let text = "/**\n * Class: Widget\n *\n * Draws *things*.\n */\n";
    let source = SourceFile::new("widget.c", text, &language);
    let synonyms = TopicSynonyms::english();
    let first = parse_source(&source, &Settings::default(), &synonyms);
    let second = parse_source(&source, &Settings::default(), &synonyms);
    assert_eq!(first, second);
}

#[test]
fn test_star_box_is_stripped_before_extraction() {
    let language = c_language();
    let text = "\
/*****************
 * Function: Box *
 * Inside.       *
 *****************/
void Box();
";
    let parsed = parse_source(
        &SourceFile::new("box.c", text, &language),
        &Settings::default(),
        &TopicSynonyms::english(),
    );
    assert_eq!(parsed.topics.len(), 1);
    let topic = &parsed.topics[0];
    assert_eq!(topic.title, "Box");
    assert_eq!(topic.line_number, 2);
    assert_eq!(topic.body.as_deref(), Some("<p>Inside.</p>"));
    assert_eq!(topic.prototype.as_deref(), Some("void Box()"));
}

#[test]
fn test_standalone_rule_is_not_body_text() {
    let language = c_language();
    let text = "// Function: Rule\n// -----\n// Text.\n";
    let parsed = parse_source(
        &SourceFile::new("rule.c", text, &language),
        &Settings::default(),
        &TopicSynonyms::english(),
    );
    assert_eq!(parsed.topics[0].body.as_deref(), Some("<p>Text.</p>"));
}

#[test]
fn test_hash_rules_around_shell_comment() {
    let language = shell_language();
    let text = "\
############
# Function: deploy
# Ships it.
############
deploy() {
";
    let parsed = parse_source(
        &SourceFile::new("deploy.sh", text, &language),
        &Settings::default(),
        &TopicSynonyms::english(),
    );
    assert_eq!(parsed.topics.len(), 1);
    let topic = &parsed.topics[0];
    assert_eq!(topic.title, "deploy");
    assert_eq!(topic.body.as_deref(), Some("<p>Ships it.</p>"));
    assert_eq!(topic.prototype.as_deref(), Some("deploy()"));
}

#[test]
fn test_compact_mode_keeps_topics() {
    let language = c_language();
    let text = "//\n//\n// Function: Foo\n//\n//\n// Text.\n//\n";
    let parsed = parse_source(
        &SourceFile::new("foo.c", text, &language),
        &Settings::default().with_preserve_line_numbers(false),
        &TopicSynonyms::english(),
    );
    assert_eq!(parsed.topics.len(), 1);
    assert_eq!(parsed.topics[0].line_number, 3);
    assert_eq!(parsed.topics[0].body.as_deref(), Some("<p>Text.</p>"));
}

#[test]
fn test_compact_mode_numbers_later_topics_by_source_line() {
    let language = c_language();
    let text = "//\n// Function: A\n//\n//\n//\n// Function: B\n// Text.\n";
    let parsed = parse_source(
        &SourceFile::new("ab.c", text, &language),
        &Settings::default().with_preserve_line_numbers(false),
        &TopicSynonyms::english(),
    );
    let lines: Vec<usize> = parsed.topics.iter().map(|t| t.line_number).collect();
    assert_eq!(lines, vec![2, 6]);
}

#[rstest]
#[case(
    "// Function: Foo\n//\n// - first\n// - second\n",
    "<ul><li>first</li><li>second</li></ul>"
)]
#[case(
    "// Function: Foo\n//\n// > x = 1;\n// > y = 2;\n",
    "<code type=\"anonymous\">x = 1;\ny = 2;</code>"
)]
fn test_line_comment_bullets_and_code_survive(#[case] text: &str, #[case] body: &str) {
    let language = c_language();
    let parsed = parse_source(
        &SourceFile::new("foo.c", text, &language),
        &Settings::default(),
        &TopicSynonyms::english(),
    );
    assert_eq!(parsed.topics.len(), 1);
    assert_eq!(parsed.topics[0].body.as_deref(), Some(body));
}

#[test]
fn test_block_comment_with_bullets_after_header() {
    let language = c_language();
    let text = "/* Function: Foo\n\n   - first\n   - second\n*/\n";
    let parsed = parse_source(
        &SourceFile::new("foo.c", text, &language),
        &Settings::default(),
        &TopicSynonyms::english(),
    );
    assert_eq!(
        parsed.topics[0].body.as_deref(),
        Some("<ul><li>first</li><li>second</li></ul>")
    );
}
