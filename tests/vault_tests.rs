//! Integration tests for the encrypted credential store.

use std::fs;

use passvault::errors::PassVaultError;
use passvault::vault::{PutOutcome, SessionPolicy, VaultPaths, VaultSession};
use tempfile::TempDir;

const MASTER: &str = "correcthorse";

/// Set up a fresh vault in a temp dir and return the unlocked session.
fn unlocked_session(dir: &TempDir) -> VaultSession {
    let mut session = VaultSession::new(VaultPaths::in_dir(dir.path()), SessionPolicy::default());
    session.setup(MASTER).unwrap();
    session
}

#[test]
fn put_then_load_returns_single_record() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();

    let outcome = store.put(&session, "example.com", "alice", "s3cret").unwrap();
    assert_eq!(outcome, PutOutcome::Added);

    let doc = store.load(&session).unwrap();
    assert_eq!(doc.len(), 1);
    let record = &doc["example.com"];
    assert_eq!(record.username, "alice");
    assert_eq!(record.password, "s3cret");
}

#[test]
fn put_twice_keeps_latest_value() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();

    store.put(&session, "example.com", "alice", "first").unwrap();
    let outcome = store.put(&session, "example.com", "bob", "second").unwrap();
    assert_eq!(outcome, PutOutcome::Updated);

    let doc = store.load(&session).unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc["example.com"].username, "bob");
    assert_eq!(doc["example.com"].password, "second");
}

#[test]
fn delete_removes_only_that_service() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();

    store.put(&session, "a.com", "u1", "p1").unwrap();
    store.put(&session, "b.com", "u2", "p2").unwrap();

    let removed = store.delete(&session, "a.com").unwrap();
    assert_eq!(removed.username, "u1");

    let doc = store.load(&session).unwrap();
    assert!(!doc.contains_key("a.com"));
    assert!(doc.contains_key("b.com"));
}

#[test]
fn delete_missing_service_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();

    store.put(&session, "example.com", "alice", "s3cret").unwrap();
    let before = fs::read(store.path()).unwrap();

    let result = store.delete(&session, "missing.com");
    assert!(matches!(result, Err(PassVaultError::CredentialNotFound(ref s)) if s == "missing.com"));

    let after = fs::read(store.path()).unwrap();
    assert_eq!(before, after, "a failed delete must not rewrite the vault");
}

#[test]
fn setup_writes_an_empty_vault() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);

    assert!(session.paths().vault_file.exists());
    assert!(session.store().load(&session).unwrap().is_empty());
}

#[test]
fn missing_or_empty_data_file_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();

    fs::remove_file(store.path()).unwrap();
    assert!(store.load(&session).unwrap().is_empty());

    fs::write(store.path(), b"").unwrap();
    assert!(store.load(&session).unwrap().is_empty());
}

#[test]
fn tampered_vault_fails_and_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();
    store.put(&session, "example.com", "alice", "s3cret").unwrap();

    let mut blob = fs::read(store.path()).unwrap();
    let last = blob.len() - 1;
    blob[last] ^= 0xFF;
    fs::write(store.path(), &blob).unwrap();

    assert!(matches!(
        store.load(&session),
        Err(PassVaultError::VaultReadFailed(_))
    ));

    // A put on an unreadable vault must abort before saving.
    let result = store.put(&session, "other.com", "bob", "pw");
    assert!(matches!(result, Err(PassVaultError::VaultReadFailed(_))));
    assert_eq!(fs::read(store.path()).unwrap(), blob);
}

#[test]
fn vault_from_another_key_is_unreadable() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let session_a = unlocked_session(&dir_a);
    let session_b = unlocked_session(&dir_b);

    session_a
        .store()
        .put(&session_a, "example.com", "alice", "s3cret")
        .unwrap();
    fs::copy(
        &session_a.paths().vault_file,
        &session_b.paths().vault_file,
    )
    .unwrap();

    assert!(matches!(
        session_b.store().load(&session_b),
        Err(PassVaultError::VaultReadFailed(_))
    ));
}

#[test]
fn locked_session_cannot_touch_the_store() {
    let dir = TempDir::new().unwrap();
    let mut session = unlocked_session(&dir);
    let store = session.store();
    session.lock();

    assert!(matches!(store.load(&session), Err(PassVaultError::VaultLocked)));
    assert!(matches!(
        store.put(&session, "example.com", "alice", "s3cret"),
        Err(PassVaultError::VaultLocked)
    ));
}

#[test]
fn records_survive_a_new_session() {
    let dir = TempDir::new().unwrap();
    {
        let session = unlocked_session(&dir);
        session
            .store()
            .put(&session, "example.com", "alice", "s3cret")
            .unwrap();
    }

    let mut session = VaultSession::new(VaultPaths::in_dir(dir.path()), SessionPolicy::default());
    assert!(session.unlock(MASTER).unwrap());

    let record = session.store().get(&session, "example.com").unwrap();
    assert_eq!(record.password, "s3cret");
}

#[test]
fn search_matches_service_or_username_ignoring_case() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();

    store.put(&session, "GitHub", "alice", "p1").unwrap();
    store.put(&session, "gitlab.com", "bob", "p2").unwrap();
    store.put(&session, "example.com", "ALICE@corp", "p3").unwrap();

    let names = |q: &str| -> Vec<String> {
        store
            .search(&session, q)
            .unwrap()
            .into_iter()
            .map(|(s, _)| s)
            .collect()
    };

    assert_eq!(names("git"), vec!["GitHub", "gitlab.com"]);
    assert_eq!(names("alice"), vec!["GitHub", "example.com"]);
    assert_eq!(names("").len(), 3);
    assert!(names("nothing").is_empty());
}

#[test]
fn unicode_service_names_round_trip() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();

    store.put(&session, "Почта", "пользователь", "пароль🔑").unwrap();
    let record = store.get(&session, "Почта").unwrap();
    assert_eq!(record.username, "пользователь");
    assert_eq!(record.password, "пароль🔑");
}

#[test]
fn blank_service_is_rejected() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);

    let result = session.store().put(&session, "   ", "alice", "pw");
    assert!(matches!(result, Err(PassVaultError::InvalidInput(_))));
}

#[test]
fn every_save_uses_a_fresh_nonce() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();

    let doc = store.load(&session).unwrap();
    store.save(&session, &doc).unwrap();
    let first = fs::read(store.path()).unwrap();
    store.save(&session, &doc).unwrap();
    let second = fs::read(store.path()).unwrap();

    assert_ne!(first, second);
}

#[test]
fn plaintext_never_hits_disk() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    session
        .store()
        .put(&session, "example.com", "alice", "VERY_DISTINCT_SECRET")
        .unwrap();

    let raw = fs::read(&session.paths().vault_file).unwrap();
    let haystack = String::from_utf8_lossy(&raw);
    assert!(!haystack.contains("VERY_DISTINCT_SECRET"));
    assert!(!haystack.contains("example.com"));
}

#[test]
fn service_names_are_trimmed_on_every_operation() {
    let dir = TempDir::new().unwrap();
    let session = unlocked_session(&dir);
    let store = session.store();

    store.put(&session, " example.com ", "alice", "s3cret").unwrap();
    assert!(store.load(&session).unwrap().contains_key("example.com"));

    assert!(store.contains(&session, "example.com  ").unwrap());
    assert_eq!(store.get(&session, "\texample.com").unwrap().username, "alice");
    assert_eq!(
        store.put(&session, "example.com", "bob", "new").unwrap(),
        PutOutcome::Updated
    );

    store.delete(&session, " example.com ").unwrap();
    assert!(store.load(&session).unwrap().is_empty());
}
