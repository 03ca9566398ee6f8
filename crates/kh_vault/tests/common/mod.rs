//! Shared test harness: a temp-file store with fixed secrets.

use kh_store::Store;
use kh_vault::config::Config;
use kh_vault::session::{AuthenticatedUser, SignUp};
use kh_vault::Keyhaven;
use tempfile::TempDir;

pub const PASSWORD: &str = "Str0ng_1";

pub struct TestApp {
    pub app: Keyhaven,
    /// Second handle on the same database file, for direct row assertions.
    pub store: Store,
    // Keeps the database directory alive for the test duration.
    _dir: TempDir,
}

pub async fn test_app() -> TestApp {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("keyhaven.db");
    // Time cost 1 keeps Argon2 fast enough for the suite.
    let config = Config::new("test-cipher-secret", "test-token-secret", 1);
    let app = Keyhaven::open(&db_path, &config)
        .await
        .expect("open keyhaven");
    let store = Store::open(&db_path).await.expect("open raw store");
    TestApp {
        app,
        store,
        _dir: dir,
    }
}

/// Sign up, sign in, and resolve the bearer token, as a caller would.
pub async fn signed_up(app: &Keyhaven, name: &str, email: &str) -> AuthenticatedUser {
    app.session
        .sign_up(&SignUp {
            name: name.into(),
            email: email.into(),
            password: PASSWORD.into(),
        })
        .await
        .expect("sign up");
    let session = app.session.sign_in(email, PASSWORD).await.expect("sign in");
    app.session
        .authenticate(&session.token)
        .await
        .expect("authenticate")
}
