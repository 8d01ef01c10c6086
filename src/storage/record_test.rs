use super::*;
use crate::storage::MemoryStore;

fn summary() -> UserProfileSummary {
    UserProfileSummary {
        full_name: "Ada Lovelace".to_owned(),
        username: "ada".to_owned(),
        avatar_url: "http://cdn.test/ada.png".to_owned(),
        profile_slug: "ada-l".to_owned(),
        pending_friend_requests: ["bob".to_owned()].into_iter().collect(),
    }
}

#[test]
fn save_then_read_returns_same_fields() {
    let vault = CredentialVault::new(MemoryStore::new());
    let record = PersistedCredentials::new("tok".to_owned(), "2026-10-16T12:00:00Z".to_owned(), summary());
    vault.save(&record).unwrap();

    assert_eq!(vault.record(), Some(record));
    assert_eq!(vault.token().as_deref(), Some("tok"));
    assert_eq!(vault.expiration().as_deref(), Some("2026-10-16T12:00:00Z"));
    assert_eq!(vault.profile(), summary());
}

#[test]
fn save_writes_a_single_key_and_drops_legacy_keys() {
    let vault = CredentialVault::new(MemoryStore::new());
    vault.store().set(keys::TOKEN, "old").unwrap();
    vault.store().set(keys::USER_PFP, "old.png").unwrap();

    let record = PersistedCredentials::new("tok".to_owned(), "2026-10-16T12:00:00Z".to_owned(), summary());
    vault.save(&record).unwrap();

    assert_eq!(vault.store().keys(), vec![keys::RECORD.to_owned()]);
}

#[test]
fn legacy_keys_are_read_when_no_record_exists() {
    let store = MemoryStore::new();
    store.set(keys::TOKEN, "legacy-token").unwrap();
    store.set(keys::EXPIRATION, "2026-10-16T12:00:00Z").unwrap();
    store.set(keys::USER_USERNAME, "ada").unwrap();
    store.set(keys::FRIEND_REQUESTS, r#"["bob","carol"]"#).unwrap();
    let vault = CredentialVault::new(store);

    assert!(vault.record().is_none());
    assert_eq!(vault.token().as_deref(), Some("legacy-token"));
    let profile = vault.profile();
    assert_eq!(profile.username, "ada");
    assert_eq!(profile.full_name, "");
    assert!(profile.pending_friend_requests.contains("carol"));
}

#[test]
fn malformed_legacy_friend_requests_yield_empty_set() {
    let store = MemoryStore::new();
    store.set(keys::FRIEND_REQUESTS, "not json").unwrap();
    let vault = CredentialVault::new(store);
    assert!(vault.profile().pending_friend_requests.is_empty());
}

#[test]
fn unknown_record_version_is_ignored() {
    let store = MemoryStore::new();
    store
        .set(
            keys::RECORD,
            r#"{"version":99,"token":"t","expiration":"e","profile":{"full_name":"","username":"","avatar_url":"","profile_slug":"","pending_friend_requests":[]}}"#,
        )
        .unwrap();
    let vault = CredentialVault::new(store);
    assert!(vault.record().is_none());
    assert!(vault.token().is_none());
}

#[test]
fn erase_is_idempotent_and_clears_everything() {
    let vault = CredentialVault::new(MemoryStore::new());
    vault.store().set(keys::PROFILE_SLUG, "ada-l").unwrap();
    vault
        .save(&PersistedCredentials::new("tok".to_owned(), "exp".to_owned(), summary()))
        .unwrap();

    vault.erase().unwrap();
    vault.erase().unwrap();
    assert!(vault.store().is_empty());
    assert!(vault.token().is_none());
}
