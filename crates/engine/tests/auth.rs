mod common;

use common::engine_with_db;
use engine::{EngineError, MemorySessionStore, SessionStore};

#[tokio::test]
async fn register_then_login_sets_current_user() {
    let (engine, _db) = engine_with_db().await;
    let sessions = MemorySessionStore::default();

    let alice = engine.register(" alice ", "s3cret").await.unwrap();
    assert_eq!(alice.username, "alice");
    assert_eq!(engine.current_user(&sessions).await.unwrap(), None);

    let logged = engine.login(&sessions, "alice", "s3cret").await.unwrap();

    assert_eq!(logged, alice);
    assert_eq!(engine.current_user(&sessions).await.unwrap(), Some(alice));
}

#[tokio::test]
async fn duplicate_username_is_taken() {
    let (engine, _db) = engine_with_db().await;
    engine.register("alice", "one").await.unwrap();

    assert_eq!(
        engine.register("alice", "two").await.unwrap_err(),
        EngineError::UsernameTaken("alice".to_string())
    );
}

#[tokio::test]
async fn register_requires_username_and_password() {
    let (engine, _db) = engine_with_db().await;

    assert!(matches!(
        engine.register("  ", "pw").await,
        Err(EngineError::Validation(_))
    ));
    assert!(matches!(
        engine.register("bob", "").await,
        Err(EngineError::Validation(_))
    ));
}

#[tokio::test]
async fn bad_credentials_do_not_touch_session() {
    let (engine, _db) = engine_with_db().await;
    let sessions = MemorySessionStore::default();
    engine.register("alice", "s3cret").await.unwrap();

    assert_eq!(
        engine
            .login(&sessions, "alice", "wrong")
            .await
            .unwrap_err(),
        EngineError::InvalidCredentials
    );
    assert_eq!(
        engine
            .login(&sessions, "nobody", "s3cret")
            .await
            .unwrap_err(),
        EngineError::InvalidCredentials
    );
    assert_eq!(sessions.load().unwrap(), None);
}

#[tokio::test]
async fn logout_reports_whether_someone_was_logged_in() {
    let (engine, _db) = engine_with_db().await;
    let sessions = MemorySessionStore::default();
    engine.register("alice", "s3cret").await.unwrap();

    assert!(!engine.logout(&sessions).await.unwrap());
    engine.login(&sessions, "alice", "s3cret").await.unwrap();
    assert!(engine.logout(&sessions).await.unwrap());
    assert_eq!(engine.current_user(&sessions).await.unwrap(), None);
}

#[tokio::test]
async fn stale_marker_resolves_to_nobody() {
    let (engine, _db) = engine_with_db().await;
    let sessions = MemorySessionStore::default();
    sessions.save("ghost").unwrap();

    assert_eq!(engine.current_user(&sessions).await.unwrap(), None);
}
