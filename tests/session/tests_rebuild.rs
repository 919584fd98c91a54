//! Rebuild marking across files.

use ndoc::language::TopicType;
use ndoc::project::SourceFile;
use ndoc::source_db::Definition;
use ndoc::topics::AutoTopic;
use ndoc::{Session, Settings};

use crate::support::{c_language, commit, commit_with_autos, file, marked, serial_session};

const HELPER: &str = "// Function: Helper\n// Helps.\nvoid Helper();\n";
const CALLER: &str = "// Function: Caller\n// Calls <Helper>.\nvoid Caller();\n";

#[test]
fn test_renaming_parent_class_marks_unchanged_child_file() {
    let mut session = serial_session();
    commit(&mut session, "foo.c", "// Class: Foo\n// The base.\n");
    commit_with_autos(
        &mut session,
        "bar.c",
        "// Class: Bar\n// Derived from <Foo>.\n",
        vec![AutoTopic::new(TopicType::Class, "Bar", 3).with_parents(["Foo"])],
    );
    assert_eq!(session.classes().parents_of("Bar"), vec!["Foo"]);
    session.take_rebuild_set();

    commit(&mut session, "foo.c", "// Class: Foo2\n// The renamed base.\n");

    let rebuild = session.rebuild_set();
    assert!(rebuild.contains("bar.c"));
    assert!(rebuild.contains("foo.c"));
    assert!(session.references(Some("Bar"), "Foo", "bar.c").is_none());
}

#[test]
fn test_new_symbol_retargets_existing_link() {
    let mut session = serial_session();
    commit(&mut session, "caller.c", CALLER);
    assert!(session.references(None, "Helper", "caller.c").is_none());
    session.take_rebuild_set();

    commit(&mut session, "helper.c", HELPER);

    assert_eq!(marked(&session), vec!["caller.c", "helper.c"]);
    let target = session.references(None, "Helper", "caller.c").unwrap();
    assert_eq!(&*target.symbol, "Helper");
    assert_eq!(&*target.file, "helper.c");
    match target.definition {
        Definition::Symbol(definition) => {
            assert_eq!(definition.prototype.as_deref(), Some("void Helper()"));
            assert_eq!(definition.summary.as_deref(), Some("Helps."));
        }
        Definition::Exists => panic!("symbols carry rich definitions"),
    }
}

#[test]
fn test_changed_summary_marks_referencing_files() {
    let mut session = serial_session();
    commit(&mut session, "helper.c", HELPER);
    commit(&mut session, "caller.c", CALLER);
    session.take_rebuild_set();

    commit(
        &mut session,
        "helper.c",
        "// Function: Helper\n// Helps a lot.\nvoid Helper();\n",
    );
    assert_eq!(marked(&session), vec!["caller.c", "helper.c"]);
}

#[test]
fn test_unchanged_reparse_marks_only_itself() {
    let mut session = serial_session();
    commit(&mut session, "helper.c", HELPER);
    commit(&mut session, "caller.c", CALLER);
    session.take_rebuild_set();

    commit(&mut session, "helper.c", HELPER);
    assert_eq!(marked(&session), vec!["helper.c"]);
}

#[test]
fn test_removed_link_is_forgotten() {
    let mut session = serial_session();
    commit(&mut session, "helper.c", HELPER);
    commit(&mut session, "caller.c", CALLER);
    assert_eq!(session.symbols().reference_count(), 1);

    commit(
        &mut session,
        "caller.c",
        "// Function: Caller\n// Calls nothing.\nvoid Caller();\n",
    );
    assert_eq!(session.symbols().reference_count(), 0);
    assert!(
        session
            .symbols()
            .referencing_files(session.db(), "Helper")
            .is_empty()
    );
}

#[test]
fn test_duplicate_definition_first_file_stays_authoritative() {
    let mut session = serial_session();
    commit(&mut session, "a.c", "// Function: Helper\n// From a.\n");
    commit(&mut session, "b.c", "// Function: Helper\n// From b.\n");
    commit(&mut session, "caller.c", CALLER);

    let target = session.references(None, "Helper", "caller.c").unwrap();
    assert_eq!(&*target.file, "a.c");
    let own = session.references(None, "Helper", "b.c").unwrap();
    assert_eq!(&*own.file, "b.c");

    // Changing the shadowed definition does not disturb readers of a.c's.
    session.take_rebuild_set();
    commit(&mut session, "b.c", "// Function: Helper\n// From b, changed.\n");
    assert_eq!(marked(&session), vec!["b.c"]);

    commit(&mut session, "a.c", "// Function: Other\n");
    let target = session.references(None, "Helper", "caller.c").unwrap();
    assert_eq!(&*target.file, "b.c");
    assert!(session.rebuild_set().contains("caller.c"));
}

#[test]
fn test_list_entries_define_qualified_symbols() {
    let mut session = serial_session();
    commit(
        &mut session,
        "math.c",
        "// Class: Math\n\n// Functions: Basics\n//\n// Add - Adds two numbers.\n// Sub - Subtracts.\n",
    );
    let target = session.references(Some("Math"), "Add", "x.c").unwrap();
    assert_eq!(&*target.symbol, "Math.Add");
    assert!(session.references(None, "Sub", "x.c").is_none());
    assert!(session.references(None, "Math.Sub", "x.c").is_some());
}

#[test]
fn test_remove_file_marks_dependents() {
    let mut session = serial_session();
    commit(&mut session, "helper.c", HELPER);
    commit(&mut session, "caller.c", CALLER);
    session.take_rebuild_set();

    session.remove_file(&file("helper.c")).unwrap();

    assert_eq!(marked(&session), vec!["caller.c"]);
    assert!(!session.db().has_file("helper.c"));
    assert!(session.references(None, "Helper", "caller.c").is_none());
}

#[test]
fn test_reparse_all_commits_in_input_order() {
    let language = c_language();
    let mut session = Session::new(Settings::default().with_parallel(true));
    let sources = vec![
        SourceFile::new("caller.c", CALLER, &language),
        SourceFile::new("helper.c", HELPER, &language),
    ];

    let parsed = session.reparse_all(&sources).unwrap();

    assert_eq!(parsed.len(), 2);
    assert_eq!(&*parsed[0].file, "caller.c");
    assert_eq!(marked(&session), vec!["caller.c", "helper.c"]);
    assert!(session.references(None, "Helper", "caller.c").is_some());
}
