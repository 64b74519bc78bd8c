//! Integration tests for file-backed account persistence.
//!
//! Exercises the full flow a form front-end drives: validate a candidate
//! record, mutate the store, and reopen it from the same file.

use std::fs;
use std::path::PathBuf;

use credledger_core::{
    AccountId, AccountStore, AccountType, FileStorage, Label, validate_account,
};

/// Unique storage path under the system temp dir, cleaned up on drop.
struct TempStore(PathBuf);

impl TempStore {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("credledger-it-{}", AccountId::new()));
        Self(dir.join("storage.json"))
    }

    fn storage(&self) -> FileStorage {
        FileStorage::new(&self.0)
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        if let Some(parent) = self.0.parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }
}

#[test]
fn edit_session_survives_reopen() {
    let temp = TempStore::new();

    let id = {
        let mut store = AccountStore::open(temp.storage()).unwrap();
        let id = store.add().unwrap();

        let mut account = store.get(id).unwrap().clone();
        account.login = "jdoe".to_string();
        account.account_type = AccountType::Local;
        account.password = Some("secret".to_string());
        account.labels = Label::parse_list("work; prod");

        validate_account(&account).unwrap();
        store.update(account).unwrap();
        id
    };

    let store = AccountStore::open(temp.storage()).unwrap();
    assert_eq!(store.len(), 1);

    let account = store.get(id).unwrap();
    assert_eq!(account.login, "jdoe");
    assert_eq!(account.account_type, AccountType::Local);
    assert_eq!(account.password.as_deref(), Some("secret"));
    assert_eq!(Label::format_list(&account.labels), "work; prod");
}

#[test]
fn delete_persists_across_reopen() {
    let temp = TempStore::new();

    let keep_id = {
        let mut store = AccountStore::open(temp.storage()).unwrap();
        let keep_id = store.add().unwrap();
        let drop_id = store.add().unwrap();
        store.delete(drop_id).unwrap();
        keep_id
    };

    let store = AccountStore::open(temp.storage()).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.get(keep_id).is_some());
}

#[test]
fn persisted_blob_uses_original_wire_format() {
    let temp = TempStore::new();

    {
        let mut store = AccountStore::open(temp.storage()).unwrap();
        let id = store.add().unwrap();
        let mut account = store.get(id).unwrap().clone();
        account.login = "jdoe".to_string();
        store.update(account).unwrap();
    }

    let contents = fs::read_to_string(&temp.0).unwrap();
    let map: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let blob = map["accounts"].as_str().unwrap();
    let records: serde_json::Value = serde_json::from_str(blob).unwrap();

    let record = &records[0];
    assert_eq!(record["type"], "LDAP");
    assert_eq!(record["login"], "jdoe");
    assert!(record["password"].is_null());
    assert!(record["labels"].as_array().unwrap().is_empty());
    assert!(record["id"].is_string());
}

#[test]
fn invalid_candidate_never_reaches_the_store() {
    let temp = TempStore::new();
    let mut store = AccountStore::open(temp.storage()).unwrap();
    let id = store.add().unwrap();

    let mut candidate = store.get(id).unwrap().clone();
    candidate.account_type = AccountType::Local; // no password set

    // The form keeps the record out of the store until validation passes.
    if validate_account(&candidate).is_ok() {
        store.update(candidate).unwrap();
    }

    let account = store.get(id).unwrap();
    assert_eq!(account.account_type, AccountType::Ldap);
}
