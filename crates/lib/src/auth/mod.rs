//! Register, login, profile, active-user and logout handling.
//!
//! [`Authenticator`] holds the two pieces of state the handlers share: the
//! user store and the [`ActiveUsers`] registry. The session is passed into
//! each call as a [`SessionContext`], so nothing here depends on cookies or
//! on any global.
//!
//! Logout is destructive: besides ending the session it deletes the account.
//!
//! Per-session lifecycle:
//!
//! ```text
//! Anonymous --login--> Authenticated --logout--> Anonymous (account erased)
//!                           |
//!                           +--account deleted elsewhere--> Orphaned
//!                                (surfaces as UserNotFound on profile)
//! ```

mod errors;

use std::sync::Arc;

pub use errors::AuthError;

use crate::registry::ActiveUsers;
use crate::session::SessionContext;
use crate::store::UserStore;
use crate::user::{Profile, User, UserId};

/// Result type for handler operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// What the profile view should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    /// No identifier is bound to the session; send the visitor to login.
    SignedOut,
    /// The signed-in user and everyone currently active.
    Ready {
        user: Profile,
        active_users: Vec<String>,
    },
}

/// The request handlers and the state they share.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn UserStore>,
    active: ActiveUsers,
}

impl Authenticator {
    pub fn new(store: Arc<dyn UserStore>, active: ActiveUsers) -> Self {
        Self { store, active }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    pub fn active(&self) -> &ActiveUsers {
        &self.active
    }

    /// Create a new account.
    ///
    /// Does not touch the session; callers send the visitor on to login.
    pub async fn register(&self, username: &str, password: &str) -> AuthResult<UserId> {
        require("username", username)?;
        require("password", password)?;

        if self.store.find_by_username(username).await?.is_some() {
            tracing::info!(username, "Registration rejected: username taken");
            return Err(AuthError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        let user = User::new(username, password);
        // The store re-checks uniqueness, so a racing registration still fails cleanly.
        self.store.insert(&user).await?;
        tracing::info!(username, id = %user.id, "Registered new user");
        Ok(user.id)
    }

    /// Authenticate and bind the session to the matching account.
    pub async fn login(
        &self,
        session: &dyn SessionContext,
        username: &str,
        password: &str,
    ) -> AuthResult<Profile> {
        let Some(user) = self.store.find_by_credentials(username, password).await? else {
            tracing::warn!(username, "Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        session.bind(user.id.clone()).await;
        self.active.add(&user.username).await;
        tracing::info!(username, id = %user.id, "User logged in");
        Ok(user.profile())
    }

    /// Resolve the profile page for this session.
    pub async fn profile(&self, session: &dyn SessionContext) -> AuthResult<ProfileView> {
        let Some(id) = session.user_id().await else {
            return Ok(ProfileView::SignedOut);
        };

        let Some(user) = self.store.find_profile(&id).await? else {
            tracing::warn!(id = %id, "Session bound to a user that no longer exists");
            return Err(AuthError::UserNotFound { id });
        };

        Ok(ProfileView::Ready {
            user,
            active_users: self.active.list().await,
        })
    }

    /// Everyone currently considered logged in. Requires no session.
    pub async fn active_users(&self) -> Vec<String> {
        self.active.list().await
    }

    /// End the session and delete the account behind it.
    ///
    /// A stale identifier (account already gone) still destroys the session.
    /// If the delete fails the name is already off the registry, while the
    /// record and the session binding both remain.
    pub async fn logout(&self, session: &dyn SessionContext) -> AuthResult<()> {
        let Some(id) = session.user_id().await else {
            return Err(AuthError::NoActiveSession);
        };

        if let Some(user) = self.store.find_by_id(&id).await? {
            self.active.remove(&user.username).await;
            self.store.delete(&id).await?;
            tracing::info!(username = %user.username, id = %id, "User logged out and account deleted");
        } else {
            tracing::warn!(id = %id, "Logout for a user that no longer exists");
        }

        session.destroy().await?;
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> AuthResult<()> {
    if value.is_empty() {
        return Err(AuthError::MissingField { field });
    }
    Ok(())
}
