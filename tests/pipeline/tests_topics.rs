//! Topic extraction and merging over whole files.

use ndoc::language::{TopicKind, TopicType};
use ndoc::markup::format_body;
use ndoc::project::{ParsedFile, SourceFile, parse_source};
use ndoc::topics::AutoTopic;
use ndoc::{Settings, TopicSynonyms};

use crate::support::c_language;

fn parse(text: &str, auto_topics: Vec<AutoTopic>) -> ParsedFile {
    let language = c_language();
    let source = SourceFile::new("test.c", text, &language).with_auto_topics(auto_topics);
    parse_source(&source, &Settings::default(), &TopicSynonyms::english())
}

fn titles(parsed: &ParsedFile) -> Vec<&str> {
    parsed.topics.iter().map(|t| t.title.as_str()).collect()
}

#[test]
fn test_header_needs_preceding_blank_line() {
    let parsed = parse("// Intro.\n// Function: NotHeader\n", Vec::new());
    assert!(parsed.topics.is_empty());

    let parsed = parse("// Intro.\n//\n// Function: Foo\n", Vec::new());
    assert_eq!(titles(&parsed), vec!["Foo"]);
    assert_eq!(parsed.topics[0].kind, TopicKind::Single(TopicType::Function));
    assert_eq!(parsed.topics[0].line_number, 3);
}

#[test]
fn test_class_scopes_following_topics_until_section() {
    let text = "\
// Class: Dog
// A dog.

// Function: Bark
// Barks.

// Section: Helpers

// Function: Wag
// Wags.
";
    let parsed = parse(text, Vec::new());
    assert_eq!(titles(&parsed), vec!["Dog", "Bark", "Helpers", "Wag"]);
    assert_eq!(parsed.topics[1].symbol(), "Dog.Bark");
    assert_eq!(parsed.topics[3].symbol(), "Wag");
    assert_eq!(parsed.topics[3].package, None);
    assert_eq!(parsed.title, "Dog");
}

#[test]
fn test_undocumented_member_gets_class_delineator() {
    let text = "// Function: Start\n// Starts.\nvoid Start();\n";
    let autos = vec![AutoTopic::new(TopicType::Function, "Run", 10).with_package("Engine")];
    let parsed = parse(text, autos);

    assert_eq!(titles(&parsed), vec!["Start", "Engine", "Run"]);
    assert_eq!(parsed.topics[1].kind, TopicKind::Single(TopicType::Class));
    assert_eq!(parsed.topics[2].symbol(), "Engine.Run");
}

#[test]
fn test_documented_only_drops_undocumented_autos() {
    let language = c_language();
    let text = "// Function: Start\n// Starts.\nvoid Start();\n";
    let autos = vec![AutoTopic::new(TopicType::Function, "Run", 10)];
    let source = SourceFile::new("test.c", text, &language).with_auto_topics(autos);
    let parsed = parse_source(
        &source,
        &Settings::default().with_documented_only(true),
        &TopicSynonyms::english(),
    );
    assert_eq!(titles(&parsed), vec!["Start"]);
}

#[test]
fn test_auto_topic_supplies_prototype_and_package() {
    let text = "// Function: Bark\n// Barks loudly.\n";
    let autos = vec![
        AutoTopic::new(TopicType::Function, "Bark", 3)
            .with_package("Dog")
            .with_prototype("void Bark(int volume)"),
    ];
    let parsed = parse(text, autos);

    // The member moved into Dog, so a Dog delineator precedes it.
    assert_eq!(titles(&parsed), vec!["Dog", "Bark"]);
    let bark = &parsed.topics[1];
    assert_eq!(bark.prototype.as_deref(), Some("void Bark(int volume)"));
    assert_eq!(bark.symbol(), "Dog.Bark");
    assert_eq!(bark.summary.as_deref(), Some("Barks loudly."));
}

#[test]
fn test_markup_bold_needs_surrounding_whitespace() {
    assert_eq!(format_body(&["A *bold* B"]), "<p>A <b>bold</b> B</p>");
    assert_eq!(format_body(&["A*B*C"]), "<p>A*B*C</p>");
}

#[test]
fn test_plain_text_only_gains_paragraphs() {
    assert_eq!(
        format_body(&["Nothing special", "here at all"]),
        "<p>Nothing special here at all</p>"
    );
}
