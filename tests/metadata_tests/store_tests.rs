//! Tests for MetadataStore
//!
//! These tests verify:
//! - Initialization (creates document and parents, idempotent)
//! - Tolerant reads (absent, corrupt, non-array documents)
//! - Whole-document replacement on write

use std::fs;

use fileshare::metadata::{FileRecord, MetadataStore, Validation};
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, MetadataStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = MetadataStore::new(temp_dir.path().join("storage").join("metadata.json"));
    (temp_dir, store)
}

// =============================================================================
// Initialize Tests
// =============================================================================

#[test]
fn test_initialize_creates_empty_document() {
    let (_temp, store) = setup_temp_store();

    assert!(!store.path().exists());
    store.initialize().unwrap();

    assert!(store.path().is_file());
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_initialize_twice_keeps_existing_entries() {
    let (_temp, store) = setup_temp_store();
    store.initialize().unwrap();
    store
        .write_all(&[json!({ "id": "a", "file_name": "a.txt", "size": 1, "timestamp": "2024-05-01T10:20:30Z" })])
        .unwrap();
    let before = fs::read(store.path()).unwrap();

    store.initialize().unwrap();
    store.initialize().unwrap();

    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_initialize_leaves_corrupt_document_alone() {
    let (_temp, store) = setup_temp_store();
    store.initialize().unwrap();
    fs::write(store.path(), b"garbage").unwrap();

    store.initialize().unwrap();

    assert_eq!(fs::read(store.path()).unwrap(), b"garbage");
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_absent_document() {
    let (_temp, store) = setup_temp_store();
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_read_invalid_json() {
    let (_temp, store) = setup_temp_store();
    store.initialize().unwrap();
    fs::write(store.path(), b"[{\"id\": ").unwrap();

    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_read_non_array_document() {
    let (_temp, store) = setup_temp_store();
    store.initialize().unwrap();
    fs::write(store.path(), br#"{"id": "x"}"#).unwrap();

    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_read_returns_entries_untouched() {
    let (_temp, store) = setup_temp_store();
    store.initialize().unwrap();
    let entries = vec![json!({ "id": "a" }), json!(42), json!({ "anything": [1, 2] })];

    store.write_all(&entries).unwrap();

    assert_eq!(store.read_all().unwrap(), entries);
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_write_replaces_whole_document() {
    let (_temp, store) = setup_temp_store();
    store.initialize().unwrap();

    store.write_all(&[json!({ "id": "a" }), json!({ "id": "b" })]).unwrap();
    store.write_all(&[json!({ "id": "c" })]).unwrap();

    assert_eq!(store.read_all().unwrap(), vec![json!({ "id": "c" })]);
}

#[test]
fn test_written_record_validates() {
    let (_temp, store) = setup_temp_store();
    store.initialize().unwrap();
    let record = FileRecord::new("abc", "report.pdf", 48213);

    store.write_all(&[record.to_entry().unwrap()]).unwrap();

    let entries = store.read_all().unwrap();
    assert_eq!(FileRecord::validate(&entries[0]), Validation::Valid(record));
}

#[test]
fn test_document_is_pretty_printed_array() {
    let (_temp, store) = setup_temp_store();
    store.initialize().unwrap();

    store.write_all(&[json!({ "id": "a" })]).unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    assert!(text.starts_with("[\n  {"));
}
