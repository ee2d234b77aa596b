//! Saving to and loading from files on disk.
mod common;

use common::{sample_preferences, temp_path, Preferences};
use prefsync_core::{parse_file, write_to_file, PrefError, Record, Value};

#[test]
fn save_then_load_restores_record() {
    let path = temp_path("roundtrip");
    let mut original = sample_preferences();
    original.save(&path).unwrap();

    let mut loaded = Preferences::default();
    loaded.load(&path).unwrap();
    assert_eq!(loaded, original);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn load_then_extend_then_save() {
    let path = temp_path("extend");
    sample_preferences().save(&path).unwrap();

    let mut prefs = Preferences::default();
    prefs.load(&path).unwrap();
    prefs.footnotes.push(Box::default());
    prefs.save(&path).unwrap();

    let mut reread = Preferences::default();
    reread.load(&path).unwrap();
    assert_eq!(reread.footnotes.len(), 2);
    assert_eq!(reread.footnotes[1].author, "Anonymous");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_file_is_a_no_op() {
    let path = temp_path("missing");
    let mut prefs = sample_preferences();
    prefs.load(&path).unwrap();
    assert_eq!(prefs, sample_preferences());
}

#[test]
fn empty_file_is_a_no_op() {
    let path = temp_path("empty");
    std::fs::write(&path, "").unwrap();
    let mut prefs = sample_preferences();
    prefs.load(&path).unwrap();
    assert_eq!(prefs, sample_preferences());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn save_into_missing_directory_fails_with_io() {
    let path = temp_path("no-such-dir").join("prefs.json");
    let err = sample_preferences().save(&path).unwrap_err();
    match err {
        PrefError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn corrupt_file_fails_to_load() {
    let path = temp_path("corrupt");
    std::fs::write(&path, r#"{"privileged": ture}"#).unwrap();
    let mut prefs = Preferences::default();
    let err = prefs.load(&path).unwrap_err();
    assert!(matches!(err, PrefError::MalformedLiteral { .. }));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn raw_value_file_round_trip() {
    let path = temp_path("value");
    let mut doc = Value::object();
    doc.as_object_mut()
        .unwrap()
        .insert("file".into(), Value::from("test.json"));
    write_to_file(&doc, &path).unwrap();
    assert_eq!(parse_file(&path).unwrap(), doc);
    std::fs::remove_file(&path).unwrap();
}
