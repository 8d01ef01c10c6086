use std::io::Write;
use std::time::Duration;

use helenite::config::ExpiryPolicy;
use helenite::profile::UserProfileSummary;
use helenite::storage::{CredentialVault, PersistedCredentials};

use super::*;

fn session_in(dir: &tempfile::TempDir, config: ClientConfig) -> Session {
    SessionContext::new(FileStore::new(dir.path().join("credentials.json")), config)
}

#[test]
fn read_upload_infers_image_type_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Avatar.PNG");
    std::fs::File::create(&path).unwrap().write_all(b"\x89PNG").unwrap();

    let upload = read_upload(&path).unwrap();
    assert_eq!(upload.file_name, "Avatar.PNG");
    assert_eq!(upload.content_type, "image/png");
    assert_eq!(upload.bytes, b"\x89PNG");
}

#[test]
fn read_upload_keeps_unknown_types_for_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let upload = read_upload(&path).unwrap();
    assert_eq!(upload.content_type, "application/octet-stream");
}

#[test]
fn read_upload_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_upload(&dir.path().join("missing.jpg")).unwrap_err();
    assert!(matches!(err, CliError::ReadFile { .. }));
}

#[test]
fn describe_navigation_names_the_next_route() {
    assert_eq!(describe_navigation(&Navigation::Stay), None);
    assert_eq!(describe_navigation(&Navigation::Reload).as_deref(), Some("reload"));
    assert_eq!(describe_navigation(&Navigation::To(Route::Feed)).as_deref(), Some("next: /feed"));
    let delayed = Navigation::ToAfter { route: Route::Login, delay: Duration::from_secs(3) };
    assert_eq!(describe_navigation(&delayed).as_deref(), Some("next: /login (after 3000ms)"));
}

#[test]
fn cli_parses_nested_post_commands() {
    let cli = Cli::try_parse_from(["helenite", "post", "comment", "p1", "nice shot"]).unwrap();
    let Command::Post(PostCommand { command: PostSubcommand::Comment { post_id, text } }) = cli.command else {
        panic!("expected post comment");
    };
    assert_eq!(post_id, "p1");
    assert_eq!(text, "nice shot");
}

#[test]
fn cli_joins_search_terms() {
    let cli = Cli::try_parse_from(["helenite", "search", "ada", "lovelace"]).unwrap();
    let Command::Search { terms } = cli.command else {
        panic!("expected search");
    };
    assert_eq!(terms.join(" "), "ada lovelace");
}

#[test]
fn cli_rejects_search_without_terms() {
    assert!(Cli::try_parse_from(["helenite", "search"]).is_err());
}

#[test]
fn gate_refuses_gated_routes_without_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir, ClientConfig::default());

    let err = gate(&mut session, &Route::Feed).unwrap_err();
    assert!(matches!(err, CliError::NotSignedIn(Route::Login)));
    assert_eq!(gate(&mut session, &Route::AboutUs).unwrap(), None);
}

#[test]
fn gate_refuses_an_expired_session_under_enforce() {
    let dir = tempfile::tempdir().unwrap();
    let profile = UserProfileSummary { username: "ada".into(), ..UserProfileSummary::default() };
    let expired = PersistedCredentials::new("tok-ada".into(), "2000-01-01T00:00:00Z".into(), profile);
    CredentialVault::new(FileStore::new(dir.path().join("credentials.json"))).save(&expired).unwrap();

    let mut presence = session_in(&dir, ClientConfig::default());
    assert_eq!(gate(&mut presence, &Route::Feed).unwrap().as_deref(), Some("tok-ada"));

    let enforce = ClientConfig { expiry_policy: ExpiryPolicy::Enforce, ..ClientConfig::default() };
    let mut session = session_in(&dir, enforce);
    assert!(matches!(gate(&mut session, &Route::Feed), Err(CliError::NotSignedIn(Route::Login))));
}
