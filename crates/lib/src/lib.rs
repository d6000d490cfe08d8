//!
//! Turnstile: a minimal session-based account service.
//! This library provides the handler logic and the state it operates on;
//! the HTTP surface, views and cookie plumbing live in the server binary.
//!
//! ## Core Concepts
//!
//! * **Users (`user::User`)**: a persisted record of generated identifier,
//!   username and password. Views only ever see the password-free
//!   `user::Profile`.
//! * **Stores (`store::UserStore`)**: a pluggable persistence boundary with
//!   in-memory, SQL and offline implementations.
//! * **Sessions (`session::SessionContext`)**: an explicit per-request
//!   capability binding a browser session to at most one identifier.
//! * **Active users (`registry::ActiveUsers`)**: the ordered set of usernames
//!   currently considered logged in, owned by the service instance.
//! * **Handlers (`auth::Authenticator`)**: register, login, profile,
//!   active-users and logout.
//!
//! Passwords are stored and compared in plaintext. Do not put this in front
//! of real credentials without adding hashing.

pub mod auth;
pub mod registry;
pub mod session;
pub mod store;
pub mod user;

pub use auth::{AuthError, Authenticator, ProfileView};
pub use registry::ActiveUsers;
pub use session::{MemorySession, SessionContext, SessionError, SessionStore};
pub use store::{StoreError, UserStore};
pub use user::{Profile, User, UserId};
