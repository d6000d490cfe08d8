/*! Integration tests for Turnstile.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - auth: Register/login/profile/logout flows through the Authenticator
 * - registry: ActiveUsers behaviour under the handlers
 * - session: SessionStore and SessionContext behaviour
 * - store: UserStore implementations (in-memory, SQL, offline, snapshots)
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("turnstile=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod registry;
mod store;
