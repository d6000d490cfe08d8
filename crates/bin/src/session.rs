//! Cookie-backed sessions for the web interface.
//!
//! The browser holds a signed cookie carrying an opaque token; the token maps
//! to a user identifier in the in-process [`SessionStore`]. Sessions are
//! ephemeral and lost on server restart.

use async_trait::async_trait;
use sha2::{Digest, Sha512};
use tower_cookies::{Cookie, Cookies, Key};
use turnstile::{SessionContext, SessionError, SessionStore, UserId};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "turnstile_session";

/// Derive the cookie signing key from a configured secret of any length.
pub fn session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// The session for one request.
///
/// A missing, tampered or unknown cookie reads as "no bound identifier".
pub struct CookieSession {
    cookies: Cookies,
    key: Key,
    store: SessionStore,
}

impl CookieSession {
    pub fn new(cookies: Cookies, key: Key, store: SessionStore) -> Self {
        Self {
            cookies,
            key,
            store,
        }
    }

    fn token(&self) -> Option<String> {
        self.cookies
            .signed(&self.key)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }

    fn set_token(&self, token: String) {
        let mut cookie = Cookie::new(SESSION_COOKIE, token);
        cookie.set_http_only(true);
        cookie.set_path("/");
        self.cookies.signed(&self.key).add(cookie);
    }
}

#[async_trait]
impl SessionContext for CookieSession {
    async fn user_id(&self) -> Option<UserId> {
        let token = self.token()?;
        self.store.get(&token).await
    }

    async fn bind(&self, id: UserId) {
        if let Some(token) = self.token()
            && self.store.rebind(&token, id.clone()).await
        {
            return;
        }
        let token = self.store.create(id).await;
        self.set_token(token);
    }

    async fn destroy(&self) -> Result<(), SessionError> {
        if let Some(token) = self.token() {
            self.store.destroy(&token).await;
        }
        let mut removal = Cookie::from(SESSION_COOKIE);
        removal.set_path("/");
        self.cookies.signed(&self.key).remove(removal);
        Ok(())
    }
}
