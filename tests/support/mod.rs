//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use ndoc::language::LanguageSpec;
use ndoc::project::{ParsedFile, Session, SourceFile};
use ndoc::topics::AutoTopic;
use ndoc::{FileName, Settings};

/// A C-like language: `//` and `/* */` comments, `;` and `{` end prototypes.
pub fn c_language() -> LanguageSpec {
    LanguageSpec::new("C")
        .with_line_comments(["//"])
        .with_block_comments([("/*", "*/")])
        .with_function_enders(["{", ";"])
        .with_variable_enders([";", "="])
}

/// A shell-like language with `#` comments.
pub fn shell_language() -> LanguageSpec {
    LanguageSpec::new("Shell")
        .with_line_comments(["#"])
        .with_function_enders(["{"])
        .with_line_extender("\\")
}

/// A session that parses on the calling thread.
pub fn serial_session() -> Session {
    Session::new(Settings::default().with_parallel(false))
}

/// Parse and commit `text` as `file`.
pub fn commit(session: &mut Session, file: &str, text: &str) -> ParsedFile {
    commit_with_autos(session, file, text, Vec::new())
}

pub fn commit_with_autos(
    session: &mut Session,
    file: &str,
    text: &str,
    auto_topics: Vec<AutoTopic>,
) -> ParsedFile {
    let language = c_language();
    let source = SourceFile::new(file, text, &language).with_auto_topics(auto_topics);
    session.reparse_file(&source).unwrap()
}

/// Files currently marked for rebuild, in marking order.
pub fn marked(session: &Session) -> Vec<String> {
    session.rebuild_set().iter().map(|f| f.to_string()).collect()
}

pub fn file(name: &str) -> FileName {
    FileName::from(name)
}
