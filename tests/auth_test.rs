use moodbrew::auth::{self, AuthStorage};
use moodbrew::auth::storage::Credential;

/// Helper: a file-backed AuthStorage in a temp dir.
fn temp_storage() -> (AuthStorage, String, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auth.db").to_str().unwrap().to_string();
    let storage = AuthStorage::open(&path).unwrap();
    (storage, path, dir)
}

fn api_key(key: &str) -> Credential {
    Credential::ApiKey {
        key: key.to_string(),
    }
}

// ── Storage CRUD ──────────────────────────────────────────────────

#[test]
fn get_returns_none_when_empty() {
    let (storage, _path, _dir) = temp_storage();
    assert!(storage.get("gemini").unwrap().is_none());
}

#[test]
fn set_and_get_api_key() {
    let (storage, _path, _dir) = temp_storage();
    storage.set("gemini", api_key("AIza-test")).unwrap();
    assert_eq!(storage.get("gemini").unwrap(), Some(api_key("AIza-test")));
}

#[test]
fn set_overwrites_existing() {
    let (storage, _path, _dir) = temp_storage();
    storage.set("gemini", api_key("old")).unwrap();
    storage.set("gemini", api_key("new")).unwrap();
    assert_eq!(storage.get("gemini").unwrap(), Some(api_key("new")));
}

#[test]
fn remove_nonexistent_is_ok() {
    let (storage, _path, _dir) = temp_storage();
    storage.remove("gemini").unwrap();
}

#[test]
fn credentials_survive_reopen() {
    let (storage, path, _dir) = temp_storage();
    storage.set("gemini", api_key("persisted")).unwrap();
    drop(storage);

    let reopened = AuthStorage::open(&path).unwrap();
    assert_eq!(reopened.get("gemini").unwrap(), Some(api_key("persisted")));
}

#[test]
fn stored_json_is_tagged() {
    let json = serde_json::to_value(api_key("k")).unwrap();
    assert_eq!(json["type"], "api_key");
    assert_eq!(json["key"], "k");
}

// ── Key resolution ────────────────────────────────────────────────

#[test]
fn get_api_key_falls_back_to_env() {
    let (storage, _path, _dir) = temp_storage();
    unsafe { std::env::set_var("MOODBREW_TEST_API_KEY", "from-env") };

    let key = storage
        .get_api_key("gemini", &["MOODBREW_TEST_API_KEY"])
        .unwrap();
    assert_eq!(key, Some("from-env".to_string()));

    unsafe { std::env::remove_var("MOODBREW_TEST_API_KEY") };
}

#[test]
fn get_api_key_tries_vars_in_order() {
    let (storage, _path, _dir) = temp_storage();
    unsafe { std::env::set_var("MOODBREW_TEST_SECOND_KEY", "second") };

    let key = storage
        .get_api_key(
            "gemini",
            &["MOODBREW_TEST_UNSET_FIRST", "MOODBREW_TEST_SECOND_KEY"],
        )
        .unwrap();
    assert_eq!(key, Some("second".to_string()));

    unsafe { std::env::remove_var("MOODBREW_TEST_SECOND_KEY") };
}

#[test]
fn get_api_key_ignores_empty_env() {
    let (storage, _path, _dir) = temp_storage();
    unsafe { std::env::set_var("MOODBREW_TEST_EMPTY_KEY", "") };

    let key = storage
        .get_api_key("gemini", &["MOODBREW_TEST_EMPTY_KEY"])
        .unwrap();
    assert_eq!(key, None);

    unsafe { std::env::remove_var("MOODBREW_TEST_EMPTY_KEY") };
}

#[test]
fn get_api_key_stored_takes_priority_over_env() {
    let (storage, _path, _dir) = temp_storage();
    storage.set("gemini", api_key("from-db")).unwrap();
    unsafe { std::env::set_var("MOODBREW_TEST_PRIORITY_KEY", "from-env") };

    let key = storage
        .get_api_key("gemini", &["MOODBREW_TEST_PRIORITY_KEY"])
        .unwrap();
    assert_eq!(key, Some("from-db".to_string()));

    unsafe { std::env::remove_var("MOODBREW_TEST_PRIORITY_KEY") };
}

#[test]
fn status_reflects_source() {
    let (storage, _path, _dir) = temp_storage();
    assert_eq!(
        storage
            .status("gemini", &["MOODBREW_TEST_STATUS_NEVER_SET"])
            .unwrap(),
        "not authenticated"
    );

    unsafe { std::env::set_var("MOODBREW_TEST_STATUS_KEY", "x") };
    assert_eq!(
        storage
            .status("gemini", &["MOODBREW_TEST_STATUS_KEY"])
            .unwrap(),
        "API key (MOODBREW_TEST_STATUS_KEY) ✓"
    );
    unsafe { std::env::remove_var("MOODBREW_TEST_STATUS_KEY") };

    storage.set("gemini", api_key("k")).unwrap();
    assert_eq!(
        storage
            .status("gemini", &["MOODBREW_TEST_STATUS_NEVER_SET"])
            .unwrap(),
        "API key ✓"
    );
}

// ── login / logout ────────────────────────────────────────────────

#[test]
fn login_then_logout() {
    let (_storage, path, _dir) = temp_storage();

    auth::login(&path, "gemini", " AIza-abc \n").unwrap();
    let storage = AuthStorage::open(&path).unwrap();
    assert_eq!(storage.get("gemini").unwrap(), Some(api_key("AIza-abc")));

    auth::logout(&path, "gemini").unwrap();
    assert!(storage.get("gemini").unwrap().is_none());
}

#[test]
fn login_rejects_unknown_provider() {
    let (_storage, path, _dir) = temp_storage();
    let err = auth::login(&path, "anthropic", "sk-test").unwrap_err();
    assert!(err.to_string().contains("unsupported provider"));
}

#[test]
fn login_rejects_blank_key() {
    let (_storage, path, _dir) = temp_storage();
    assert!(auth::login(&path, "gemini", "  \n").is_err());
}
