//! Serve command - runs the Turnstile web server.

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::signal::unix::{SignalKind, signal};
use tower_cookies::{CookieManagerLayer, Cookies, Key};
use turnstile::{ActiveUsers, AuthError, Authenticator, ProfileView, SessionStore};

use crate::backend::{OpenedStore, create_store};
use crate::cli::{DEFAULT_SESSION_SECRET, ServeArgs};
use crate::session::{CookieSession, session_key};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    auth: Authenticator,
    sessions: SessionStore,
    key: Key,
}

impl AppState {
    pub fn new(auth: Authenticator, secret: &str) -> Self {
        Self {
            auth,
            sessions: SessionStore::new(),
            key: session_key(secret),
        }
    }

    fn session(&self, cookies: Cookies) -> CookieSession {
        CookieSession::new(cookies, self.key.clone(), self.sessions.clone())
    }
}

/// Register and login form data
#[derive(Deserialize)]
struct CredentialsForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Run the Turnstile server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let opened = match create_store(args).await {
        Ok(opened) => opened,
        Err(e) => {
            tracing::error!("User store unavailable, running degraded: {e}");
            OpenedStore::offline(e.to_string())
        }
    };

    if args.session_secret == DEFAULT_SESSION_SECRET {
        tracing::warn!("Using the default session secret; set SESSION_SECRET in production");
    }

    let auth = Authenticator::new(opened.store.clone(), ActiveUsers::new());
    let app = router(AppState::new(auth, &args.session_secret));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    println!("Turnstile listening on http://localhost:{}", local_addr.port());
    println!("User store: {}", opened.store.kind());
    println!();
    println!("Available endpoints:");
    println!("  GET  /              - Redirect to login");
    println!("  GET  /register      - Registration page");
    println!("  POST /register      - Create an account");
    println!("  GET  /login         - Login page");
    println!("  POST /login         - Log in");
    println!("  GET  /profile       - Your profile (requires login)");
    println!("  GET  /active-users  - Everyone currently logged in");
    println!("  POST /logout        - Log out and delete your account");
    println!("  GET  /health        - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    opened.save().await;
    println!("Server shut down");
    Ok(())
}

/// Resolves on SIGTERM or SIGINT.
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!("Failed to set up SIGTERM handler: {e}");
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received SIGINT, initiating graceful shutdown...");
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
        _ = tokio::signal::ctrl_c() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root_request))
        .route(
            "/register",
            get(handle_register_page).post(handle_register_submit),
        )
        .route("/login", get(handle_login_page).post(handle_login_submit))
        .route("/profile", get(handle_profile))
        .route("/active-users", get(handle_active_users))
        .route("/logout", post(handle_logout))
        .route("/health", get(handle_health_endpoint))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

// ============================================================================
// Error Responses
// ============================================================================

/// A handler failure rendered as a status code and plain-text message.
struct HandlerError(AuthError);

impl From<AuthError> for HandlerError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

fn status_for(err: &AuthError) -> StatusCode {
    match err {
        AuthError::DuplicateUsername { .. }
        | AuthError::NoActiveSession
        | AuthError::MissingField { .. } => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::UserNotFound { .. } => StatusCode::NOT_FOUND,
        AuthError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
        }
        (status, self.0.to_string()).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for GET / - Root redirect
async fn handle_root_request() -> Redirect {
    Redirect::to("/login")
}

/// Handler for GET /register - Show registration page
async fn handle_register_page() -> Html<String> {
    Html(crate::templates::register_page())
}

/// Handler for POST /register - Create the account, then send to login
async fn handle_register_submit(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, HandlerError> {
    state.auth.register(&form.username, &form.password).await?;
    Ok(Redirect::to("/login"))
}

/// Handler for GET /login - Show login page
async fn handle_login_page() -> Html<String> {
    Html(crate::templates::login_page())
}

/// Handler for POST /login - Bind the session and send to the profile
async fn handle_login_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, HandlerError> {
    let session = state.session(cookies);
    state
        .auth
        .login(&session, &form.username, &form.password)
        .await?;
    Ok(Redirect::to("/profile"))
}

/// Handler for GET /profile - Show the signed-in user and the active list
async fn handle_profile(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Response, HandlerError> {
    let session = state.session(cookies);
    match state.auth.profile(&session).await? {
        ProfileView::SignedOut => Ok(Redirect::to("/login").into_response()),
        ProfileView::Ready { user, active_users } => {
            Ok(Html(crate::templates::profile_page(&user, &active_users)).into_response())
        }
    }
}

/// Handler for GET /active-users - Public list of logged-in usernames
async fn handle_active_users(State(state): State<AppState>) -> Html<String> {
    let active = state.auth.active_users().await;
    Html(crate::templates::active_users_page(&active))
}

/// Handler for POST /logout - Delete the account and end the session
async fn handle_logout(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Redirect, HandlerError> {
    let session = state.session(cookies);
    state.auth.logout(&session).await?;
    Ok(Redirect::to("/login"))
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    backend: &'static str,
}

/// Handler for GET /health - Health check endpoint
async fn handle_health_endpoint(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.auth.store();
    let status = match store.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Health check: store ping failed: {e}");
            "degraded"
        }
    };

    Json(HealthResponse {
        status,
        backend: store.kind(),
    })
}
