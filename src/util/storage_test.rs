use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Draft {
    title: String,
    stars: u8,
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_starts_empty() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());
    assert_eq!(storage.get_item("token"), None);
}

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    storage.set_item("token", "abc");
    assert_eq!(storage.get_item("token").as_deref(), Some("abc"));
    assert_eq!(storage.len(), 1);

    storage.set_item("token", "def");
    assert_eq!(storage.get_item("token").as_deref(), Some("def"));
    assert_eq!(storage.len(), 1);

    storage.remove_item("token");
    assert_eq!(storage.get_item("token"), None);
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let storage = MemoryStorage::with_items([("email", "a@x.com")]);
    storage.remove_item("token");
    assert_eq!(storage.len(), 1);
}

#[test]
fn check_storage_op_reports_refusal() {
    assert!(check_storage_op::<()>("write", "token", Ok(())));
    assert!(!check_storage_op("write", "token", Err("QuotaExceededError")));
    assert!(!check_storage_op("remove", "token", Err("SecurityError")));
}

// =============================================================
// JSON helpers
// =============================================================

#[test]
fn save_then_load_json() {
    let storage = MemoryStorage::new();
    let draft = Draft { title: "Dune".to_owned(), stars: 5 };
    save_json(&storage, "draft", &draft);
    assert_eq!(storage.get_item("draft").as_deref(), Some(r#"{"title":"Dune","stars":5}"#));
    assert_eq!(load_json::<Draft>(&storage, "draft"), Some(draft));
}

#[test]
fn load_json_missing_key_is_none() {
    let storage = MemoryStorage::new();
    assert_eq!(load_json::<Draft>(&storage, "draft"), None);
}

#[test]
fn load_json_malformed_value_is_none() {
    let storage = MemoryStorage::with_items([("draft", "{not json")]);
    assert_eq!(load_json::<Draft>(&storage, "draft"), None);
}

#[test]
fn load_json_wrong_shape_is_none() {
    let storage = MemoryStorage::with_items([("draft", r#"{"title":"Dune"}"#)]);
    assert_eq!(load_json::<Draft>(&storage, "draft"), None);
}

// =============================================================
// Browser storage off-browser
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_unavailable_in_native_builds() {
    assert!(browser_storage().is_none());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn local_storage_is_inert_in_native_builds() {
    let storage = LocalStorage;
    storage.set_item("token", "abc");
    assert_eq!(storage.get_item("token"), None);
    storage.remove_item("token");
}
