use std::{fs, sync::Arc, thread, time::Duration};

use warden_auth::{AuthCredentials, AuthError, AuthenticationBackend, InternalAuthenticationBackend};
use warden_config::FileIdentityProvider;

fn users_file(hash: &str, roles: &str) -> String {
    format!(
        r#"
[u1]
username = "alice"
hash = "{hash}"
roles = [{roles}]

[u1.attributes]
department = "ops"
"#
    )
}

#[test]
fn authenticates_against_users_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("internal_users.toml");
    let hash = bcrypt::hash("correct-horse", 4).unwrap();
    fs::write(&path, users_file(&hash, r#""reader", "writer""#)).unwrap();

    let provider = Arc::new(FileIdentityProvider::open(&path).unwrap());
    let backend = InternalAuthenticationBackend::new(provider);

    let mut credentials = AuthCredentials::new("alice", "correct-horse");
    let user = backend.authenticate(&mut credentials).unwrap();
    assert!(user.has_role("reader"));
    assert!(user.has_role("writer"));
    assert_eq!(user.attribute("attr.internal.department"), Some("ops"));
}

#[test]
fn file_watching_triggers_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("internal_users.toml");
    let old_hash = bcrypt::hash("old-secret", 4).unwrap();
    fs::write(&path, users_file(&old_hash, r#""reader""#)).unwrap();

    let provider = Arc::new(FileIdentityProvider::open(&path).unwrap());
    let _watch = provider.watch(Duration::from_millis(100)).unwrap();
    let backend = InternalAuthenticationBackend::new(provider.clone());

    // Give watcher a brief moment to start
    thread::sleep(Duration::from_millis(300));

    let new_hash = bcrypt::hash("new-secret", 4).unwrap();
    fs::write(&path, users_file(&new_hash, r#""reader", "admin""#)).unwrap();

    // Poll for up to 10 seconds for the change to be applied
    let mut applied = false;
    for _ in 0..100 {
        thread::sleep(Duration::from_millis(100));
        let mut credentials = AuthCredentials::new("alice", "new-secret");
        if let Ok(user) = backend.authenticate(&mut credentials) {
            assert!(user.has_role("admin"));
            applied = true;
            break;
        }
    }
    assert!(applied, "reload was not applied within timeout");

    let mut credentials = AuthCredentials::new("alice", "old-secret");
    assert!(matches!(
        backend.authenticate(&mut credentials),
        Err(AuthError::PasswordMismatch { .. })
    ));
}

#[test]
fn unloaded_provider_reports_backend_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FileIdentityProvider::new(dir.path().join("internal_users.toml"));
    let backend = InternalAuthenticationBackend::new(provider);

    let mut credentials = AuthCredentials::new("alice", "x");
    assert_eq!(
        backend.authenticate(&mut credentials).unwrap_err(),
        AuthError::BackendUnavailable
    );
}
