use super::*;
use crate::net::types::{FriendRequest, ProfileSummary, UserRef};
use crate::storage::{MemoryStore, PersistedCredentials};

fn detail() -> ProfileDetail {
    ProfileDetail {
        summary: ProfileSummary {
            user_pk: Some("1".to_owned()),
            username: "ada".to_owned(),
            full_name: "Ada Lovelace".to_owned(),
            endpoint: "/api/v1/profile/ada-l/".to_owned(),
            pfp: None,
        },
        birthday: None,
        birth_place: None,
        posts: Vec::new(),
        friend_requests: vec![
            FriendRequest { request_id: None, request_made_by: UserRef { username: "bob".to_owned() }, accepted: false },
            FriendRequest { request_id: None, request_made_by: UserRef { username: "dan".to_owned() }, accepted: true },
        ],
    }
}

#[test]
fn from_profile_flattens_payload() {
    let summary = UserProfileSummary::from_profile(&detail());
    assert_eq!(summary.full_name, "Ada Lovelace");
    assert_eq!(summary.username, "ada");
    assert_eq!(summary.avatar_url, "");
    assert_eq!(summary.profile_slug, "ada-l");
    assert_eq!(summary.pending_friend_requests.len(), 1);
    assert!(summary.pending_friend_requests.contains("bob"));
}

#[test]
fn cache_starts_empty() {
    let cache = UserProfileCache::default();
    assert!(cache.summary().is_empty());
    assert_eq!(cache.username(), "");
    assert!(!cache.has_pending_request_from("bob"));
}

#[test]
fn load_mirrors_vault_and_clear_erases_it() {
    let vault = CredentialVault::new(MemoryStore::new());
    let summary = UserProfileSummary::from_profile(&detail());
    vault
        .save(&PersistedCredentials::new("tok".to_owned(), "2026-10-16T13:00:00Z".to_owned(), summary.clone()))
        .unwrap();

    let mut cache = UserProfileCache::default();
    cache.load(&vault);
    assert_eq!(cache.summary(), &summary);
    assert!(cache.has_pending_request_from("bob"));

    cache.clear(&vault).unwrap();
    assert!(cache.summary().is_empty());
    assert!(vault.store().is_empty());

    // Clearing twice is harmless.
    cache.clear(&vault).unwrap();
}
