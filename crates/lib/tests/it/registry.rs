//! ActiveUsers behaviour as driven by the handlers.

use turnstile::{ActiveUsers, MemorySession, SessionContext};

use crate::helpers::*;

#[tokio::test]
async fn test_registry_keeps_login_order() {
    let auth =
        test_authenticator_with_users(&[("carol", "pw"), ("alice", "pw"), ("bob", "pw")]).await;

    for name in ["bob", "carol", "alice"] {
        auth.login(&MemorySession::new(), name, "pw").await.unwrap();
    }
    assert_eq!(auth.active_users().await, vec!["bob", "carol", "alice"]);
}

#[tokio::test]
async fn test_logout_removes_only_that_user() {
    let auth = test_authenticator_with_users(&[("alice", "pw"), ("bob", "pw")]).await;
    let alice = MemorySession::new();
    let bob = MemorySession::new();
    auth.login(&alice, "alice", "pw").await.unwrap();
    auth.login(&bob, "bob", "pw").await.unwrap();

    auth.logout(&alice).await.unwrap();
    assert_eq!(auth.active_users().await, vec!["bob"]);
}

#[tokio::test]
async fn test_expired_session_leaves_stale_entry() {
    let auth = test_authenticator_with_users(&[("alice", "pw")]).await;
    let session = MemorySession::new();
    auth.login(&session, "alice", "pw").await.unwrap();

    // The session collaborator drops the session on its own
    session.destroy().await.unwrap();

    assert_eq!(auth.active_users().await, vec!["alice"]);
}

#[tokio::test]
async fn test_registries_are_isolated_per_instance() {
    let first = ActiveUsers::new();
    let second = ActiveUsers::new();
    first.add("alice").await;
    assert!(second.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_adds_do_not_duplicate() {
    let active = ActiveUsers::new();
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let active = active.clone();
            tokio::spawn(async move { active.add("alice").await })
        })
        .collect();

    let mut added = 0;
    for handle in handles {
        if handle.await.unwrap() {
            added += 1;
        }
    }
    assert_eq!(added, 1);
    assert_eq!(active.list().await, vec!["alice"]);
}
