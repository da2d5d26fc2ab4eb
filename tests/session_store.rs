use saarthi::models::SessionSummary;
use saarthi::session::{
    FileStorage, KeyValueStorage, MemoryStorage, SessionStore, ACTIVE_SESSION_KEY, SUMMARIES_KEY,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn summary(id: &str, title: &str) -> SessionSummary {
    SessionSummary {
        session_id: id.to_string(),
        title: title.to_string(),
    }
}

#[test]
fn test_load_empty_storage() {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()));
    let state = store.load();
    assert!(state.summaries.is_empty());
    assert!(state.active_session.is_none());
}

#[test]
fn test_save_and_reload_keeps_order() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("saarthi");

    let summaries = vec![summary("a", "Hi"), summary("b", ""), summary("c", "Plans")];
    let store = SessionStore::new(Arc::new(FileStorage::new(&data_dir)));
    store.save(&summaries).unwrap();
    store.set_active("b").unwrap();

    // A fresh store over the same directory sees the same state
    let reopened = SessionStore::new(Arc::new(FileStorage::new(&data_dir)));
    let state = reopened.load();
    assert_eq!(state.summaries, summaries);
    assert_eq!(state.active_session.as_deref(), Some("b"));
}

#[test]
fn test_persisted_format_uses_camel_case() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(storage.clone());
    store.save(&[summary("abc", "Hello")]).unwrap();
    store.set_active("abc").unwrap();

    let raw = storage.get(SUMMARIES_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!([{"sessionId": "abc", "title": "Hello"}]));
    assert_eq!(storage.get(ACTIVE_SESSION_KEY).unwrap().as_deref(), Some("abc"));
}

#[test]
fn test_corrupt_summaries_load_as_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(SUMMARIES_KEY, "{not json").unwrap();
    storage.set(ACTIVE_SESSION_KEY, "a").unwrap();

    let state = SessionStore::new(storage).load();
    assert!(state.summaries.is_empty());
    assert_eq!(state.active_session.as_deref(), Some("a"));
}

#[test]
fn test_wrong_shape_loads_as_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(SUMMARIES_KEY, r#"{"sessionId": "a"}"#).unwrap();
    assert!(SessionStore::new(storage).load().summaries.is_empty());
}

#[test]
fn test_null_summaries_load_as_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(SUMMARIES_KEY, "null").unwrap();
    assert!(SessionStore::new(storage).load().summaries.is_empty());
}

#[test]
fn test_missing_title_defaults_to_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(SUMMARIES_KEY, r#"[{"sessionId": "a"}]"#).unwrap();
    let state = SessionStore::new(storage).load();
    assert_eq!(state.summaries, vec![summary("a", "")]);
}

#[test]
fn test_clear_removes_everything() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::new(temp_dir.path()));
    let store = SessionStore::new(storage);
    store.save(&[summary("a", "Hi")]).unwrap();
    store.set_active("a").unwrap();

    store.clear().unwrap();
    let state = store.load();
    assert!(state.summaries.is_empty());
    assert!(state.active_session.is_none());

    // Clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn test_file_storage_creates_directory_on_first_write() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("nested").join("saarthi");
    let storage = FileStorage::new(&data_dir);
    assert_eq!(storage.data_dir(), data_dir.as_path());

    assert_eq!(storage.get("sessionId").unwrap(), None);
    assert!(!data_dir.exists());

    storage.set("sessionId", "xyz").unwrap();
    assert!(data_dir.exists());
    assert_eq!(
        fs::read_to_string(data_dir.join("sessionId.json")).unwrap(),
        "xyz"
    );
}

#[test]
fn test_file_storage_rejects_path_keys() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path());
    assert!(storage.set("../escape", "x").is_err());
    assert!(storage.get("a/b").is_err());
}
