//! Class hierarchy maintained through the session.

use ndoc::language::TopicType;
use ndoc::topics::AutoTopic;

use crate::support::{commit, commit_with_autos, serial_session};

fn class_with_parent(name: &str, parent: &str) -> Vec<AutoTopic> {
    vec![AutoTopic::new(TopicType::Class, name, 1).with_parents([parent])]
}

#[test]
fn test_children_from_two_files() {
    let mut session = serial_session();
    commit_with_autos(
        &mut session,
        "dog.java",
        "// Class: Dog\n",
        class_with_parent("Dog", "Animal"),
    );
    commit_with_autos(
        &mut session,
        "cat.java",
        "// Class: Cat\n",
        class_with_parent("Cat", "Animal"),
    );

    assert_eq!(session.classes().children_of("Animal"), vec!["Dog", "Cat"]);

    commit(&mut session, "dog.java", "// Class: Dog\n");
    assert!(session.classes().has_class("Animal"));
    assert_eq!(session.classes().children_of("Animal"), vec!["Cat"]);
    assert!(session.classes().parents_of("Dog").is_empty());
}

#[test]
fn test_new_edge_marks_parent_definer() {
    let mut session = serial_session();
    commit(&mut session, "animal.java", "// Class: Animal\n");
    session.take_rebuild_set();

    commit_with_autos(
        &mut session,
        "dog.java",
        "// Class: Dog\n",
        class_with_parent("Dog", "Animal"),
    );

    let rebuild = session.rebuild_set();
    assert!(rebuild.contains("animal.java"));
    assert!(rebuild.contains("dog.java"));
}

#[test]
fn test_auto_topic_class_is_defined_with_parents() {
    let mut session = serial_session();
    commit_with_autos(
        &mut session,
        "dog.java",
        "",
        class_with_parent("Dog", "Animal"),
    );
    assert_eq!(session.classes().parents_of("Dog"), vec!["Animal"]);
    assert_eq!(
        session.classes().defining_files(session.db(), "Dog"),
        vec![ndoc::FileName::from("dog.java")]
    );
    assert!(session.classes().defining_files(session.db(), "Animal").is_empty());
}

#[test]
fn test_member_file_does_not_define_its_class() {
    let mut session = serial_session();
    commit(&mut session, "dog.h", "// Class: Dog\n// A dog.\n");
    let parsed = commit_with_autos(
        &mut session,
        "dog.c",
        "// Function: Bark\n// Barks like a <Dog>.\nvoid Bark();\n\n// Function: Main\n// Runs.\n",
        vec![AutoTopic::new(TopicType::Function, "Bark", 3).with_package("Dog")],
    );
    let titles: Vec<&str> = parsed.topics.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Dog", "Bark", "Global", "Main"]);

    assert_eq!(
        session.classes().defining_files(session.db(), "Dog"),
        vec![ndoc::FileName::from("dog.h")]
    );
    assert!(session.references(None, "Global", "dog.c").is_none());
    assert_eq!(&*session.references(None, "Dog", "dog.c").unwrap().file, "dog.h");
    assert_eq!(
        &*session.references(Some("Dog"), "Bark", "x.c").unwrap().symbol,
        "Dog.Bark"
    );
    session.take_rebuild_set();

    commit(&mut session, "dog.h", "// Function: Other\n");

    assert!(session.references(Some("Dog"), "Dog", "dog.c").is_none());
    assert!(!session.classes().has_class("Dog"));
    assert!(session.rebuild_set().contains("dog.c"));
}
