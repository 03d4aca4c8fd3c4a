use formpulse_core::{SessionRepository, SqliteSessionRepository, EMAIL_KEY, NAME_KEY, TOKEN_KEY};

#[test]
fn get_of_missing_key_returns_none() {
    let repo = SqliteSessionRepository::in_memory().unwrap();
    assert_eq!(repo.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn set_then_get_round_trip() {
    let repo = SqliteSessionRepository::in_memory().unwrap();

    repo.set(TOKEN_KEY, "tok-1").unwrap();
    repo.set(NAME_KEY, "Dana").unwrap();
    repo.set(EMAIL_KEY, "dana@example.com").unwrap();

    assert_eq!(repo.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
    assert_eq!(repo.get(NAME_KEY).unwrap().as_deref(), Some("Dana"));
    assert_eq!(
        repo.get(EMAIL_KEY).unwrap().as_deref(),
        Some("dana@example.com")
    );
}

#[test]
fn set_overwrites_existing_value() {
    let repo = SqliteSessionRepository::in_memory().unwrap();

    repo.set(TOKEN_KEY, "old").unwrap();
    repo.set(TOKEN_KEY, "new").unwrap();

    assert_eq!(repo.get(TOKEN_KEY).unwrap().as_deref(), Some("new"));
}

#[test]
fn clear_removes_every_key_not_just_session_identity() {
    let repo = SqliteSessionRepository::in_memory().unwrap();

    repo.set(TOKEN_KEY, "tok-1").unwrap();
    repo.set("THEME", "dark").unwrap();

    repo.clear().unwrap();

    assert_eq!(repo.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(repo.get("THEME").unwrap(), None);
}

#[test]
fn values_survive_reopen_from_the_same_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    {
        let repo = SqliteSessionRepository::open(&path).unwrap();
        repo.set(TOKEN_KEY, "tok-1").unwrap();
    }

    let reopened = SqliteSessionRepository::open(&path).unwrap();
    assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
}
