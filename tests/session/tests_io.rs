//! Reading sources from disk.

use std::io::Write;

use ndoc::NdocError;
use tempfile::NamedTempFile;

use crate::support::{c_language, serial_session};

#[test]
fn test_reparse_path_reads_file() {
    let mut temp = NamedTempFile::new().unwrap();
    writeln!(temp, "// Function: Load\n// Loads.\nvoid Load();").unwrap();

    let mut session = serial_session();
    let parsed = session
        .reparse_path(temp.path(), &c_language(), Vec::new())
        .unwrap();

    assert_eq!(parsed.topics.len(), 1);
    assert_eq!(parsed.title, "Load");
    assert!(session.rebuild_set().contains(&parsed.file));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.c");

    let mut session = serial_session();
    let error = session
        .reparse_path(&path, &c_language(), Vec::new())
        .unwrap_err();

    assert!(!error.is_contract_violation());
    match &error {
        NdocError::Io { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert!(error.to_string().contains("missing.c"));
    assert!(session.rebuild_set().is_empty());
}
