//! UserStore implementation tests.
//!
//! The contract tests run against whatever `test_store()` returns, so
//! `TEST_BACKEND=sqlite` exercises the SQL store with the same assertions.

use turnstile::{
    StoreError, User, UserId,
    store::{InMemory, Offline, UserStore},
};

use crate::helpers::test_store;

// ===== CONTRACT =====

#[tokio::test]
async fn test_insert_and_find() {
    let store = test_store().await;
    let user = User::new("alice", "pw1");
    store.insert(&user).await.unwrap();

    assert_eq!(store.find_by_username("alice").await.unwrap(), Some(user.clone()));
    assert_eq!(store.find_by_id(&user.id).await.unwrap(), Some(user.clone()));
    assert_eq!(
        store.find_by_credentials("alice", "pw1").await.unwrap(),
        Some(user.clone())
    );
    assert_eq!(store.find_profile(&user.id).await.unwrap(), Some(user.profile()));
}

#[tokio::test]
async fn test_lookups_miss_cleanly() {
    let store = test_store().await;
    assert_eq!(store.find_by_username("ghost").await.unwrap(), None);
    assert_eq!(store.find_by_id(&UserId::generate()).await.unwrap(), None);
    assert_eq!(store.find_profile(&UserId::generate()).await.unwrap(), None);
    assert_eq!(store.find_by_credentials("ghost", "pw").await.unwrap(), None);
}

#[tokio::test]
async fn test_credentials_require_exact_match() {
    let store = test_store().await;
    store.insert(&User::new("alice", "pw1")).await.unwrap();

    assert!(store.find_by_credentials("alice", "pw2").await.unwrap().is_none());
    assert!(store.find_by_credentials("ALICE", "pw1").await.unwrap().is_none());
    assert!(store.find_by_credentials("alice", "pw1 ").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let store = test_store().await;
    store.insert(&User::new("alice", "pw1")).await.unwrap();

    let err = store.insert(&User::new("alice", "pw2")).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateUsername { ref username } if username == "alice"));
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_delete_reports_whether_removed() {
    let store = test_store().await;
    let user = User::new("alice", "pw1");
    store.insert(&user).await.unwrap();

    assert!(store.delete(&user.id).await.unwrap());
    assert!(!store.delete(&user.id).await.unwrap());
    assert_eq!(store.find_by_username("alice").await.unwrap(), None);

    // The name is free again
    store.insert(&User::new("alice", "pw3")).await.unwrap();
}

#[tokio::test]
async fn test_ping_succeeds() {
    let store = test_store().await;
    store.ping().await.unwrap();
}

// ===== IN-MEMORY SNAPSHOTS =====

#[tokio::test]
async fn test_snapshot_round_trip_preserves_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("turnstile.json");

    let store = InMemory::new();
    let alice = User::new("alice", "pw1");
    store.insert(&alice).await.unwrap();
    store.insert(&User::new("bob", "pw2")).await.unwrap();
    store.save_to_file(&path).await.unwrap();

    let loaded = InMemory::load_from_file(&path).await.unwrap();
    assert_eq!(loaded.len().await, 2);
    assert_eq!(loaded.find_by_id(&alice.id).await.unwrap(), Some(alice));

    // Uniqueness still holds after a reload
    assert!(loaded.insert(&User::new("bob", "x")).await.is_err());
}

#[tokio::test]
async fn test_loading_missing_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = InMemory::load_from_file(dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::FileIo { .. }));
}

#[tokio::test]
async fn test_loading_corrupt_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("turnstile.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let err = InMemory::load_from_file(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::Serialization { .. }));
}

#[tokio::test]
async fn test_loading_future_snapshot_version_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("turnstile.json");
    tokio::fs::write(&path, r#"{"_v": 9, "users": []}"#)
        .await
        .unwrap();

    assert!(InMemory::load_from_file(&path).await.is_err());
}

// ===== OFFLINE =====

#[tokio::test]
async fn test_offline_fails_every_call() {
    let store = Offline::new("no route to host");
    assert_eq!(store.kind(), "offline");

    let err = store.ping().await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { ref reason } if reason == "no route to host"));
    assert!(err.is_unavailable());
    assert!(store.find_by_username("alice").await.is_err());
    assert!(store.insert(&User::new("alice", "pw")).await.is_err());
    assert!(store.delete(&UserId::generate()).await.is_err());
}

// ===== SQL =====

#[cfg(feature = "sqlite")]
mod sqlite {
    use turnstile::store::SqlxStore;

    use super::*;

    #[tokio::test]
    async fn test_sqlite_file_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turnstile.db");
        let user = User::new("alice", "pw1");

        {
            let store = SqlxStore::open_sqlite(&path).await.unwrap();
            assert_eq!(store.kind(), "sqlite");
            store.insert(&user).await.unwrap();
        }

        let reopened = SqlxStore::open_sqlite(&path).await.unwrap();
        assert_eq!(reopened.find_by_id(&user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_sqlite_unique_constraint_maps_to_duplicate() {
        let store = SqlxStore::sqlite_in_memory().await.unwrap();
        store.insert(&User::new("alice", "pw1")).await.unwrap();

        let err = store.insert(&User::new("alice", "pw2")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_sqlite_in_memory_databases_are_private() {
        let first = SqlxStore::sqlite_in_memory().await.unwrap();
        let second = SqlxStore::sqlite_in_memory().await.unwrap();
        first.insert(&User::new("alice", "pw")).await.unwrap();
        assert_eq!(second.find_by_username("alice").await.unwrap(), None);
    }
}
