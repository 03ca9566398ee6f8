//! Sign-up, sign-in, and bearer authentication.

mod common;

use common::{signed_up, test_app, PASSWORD};
use kh_crypto::TokenKeys;
use kh_vault::session::SignUp;
use kh_vault::{VaultError, UNAUTHENTICATED_MSG};

#[tokio::test]
async fn sign_up_stores_hash_never_plaintext() {
    let t = test_app().await;

    let record = t
        .app
        .session
        .sign_up(&SignUp {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password: PASSWORD.into(),
        })
        .await
        .expect("sign up");
    assert_eq!(record.name, "Ann");
    assert_eq!(record.email, "ann@x.com");

    let row = t
        .store
        .find_user_by_email("ann@x.com")
        .await
        .expect("query user")
        .expect("user row exists");
    assert_ne!(row.password_hash, PASSWORD);
    assert!(row.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let t = test_app().await;
    signed_up(&t.app, "Ann", "ann@x.com").await;

    let err = t
        .app
        .session
        .sign_up(&SignUp {
            name: "Another Ann".into(),
            email: "ann@x.com".into(),
            password: PASSWORD.into(),
        })
        .await
        .expect_err("second sign-up must fail");
    assert!(matches!(err, VaultError::Conflict(_)));
}

#[tokio::test]
async fn sign_in_returns_a_working_token() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    let session = t
        .app
        .session
        .sign_in("ann@x.com", PASSWORD)
        .await
        .expect("sign in");
    let resolved = t
        .app
        .session
        .authenticate(&session.token)
        .await
        .expect("authenticate");
    assert_eq!(resolved, user);
}

#[tokio::test]
async fn sign_in_failures_are_indistinguishable() {
    let t = test_app().await;
    signed_up(&t.app, "Ann", "ann@x.com").await;

    let unknown = t
        .app
        .session
        .sign_in("nouser@x.com", "anything")
        .await
        .expect_err("unknown email must fail");
    let wrong = t
        .app
        .session
        .sign_in("ann@x.com", "wrongpassword")
        .await
        .expect_err("wrong password must fail");

    assert!(matches!(unknown, VaultError::Unauthenticated));
    assert!(matches!(wrong, VaultError::Unauthenticated));
    // Identical kind AND identical message text.
    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(unknown.to_string(), UNAUTHENTICATED_MSG);
}

#[tokio::test]
async fn authenticate_rejects_bad_tokens() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    for bad in ["", "garbage", "a.b", "!!!.???"] {
        let err = t
            .app
            .session
            .authenticate(bad)
            .await
            .expect_err("bad token must fail");
        assert!(matches!(err, VaultError::Unauthenticated), "accepted {bad:?}");
    }

    // Token signed with a different secret never authenticates.
    let foreign = TokenKeys::new("some-other-secret")
        .unwrap()
        .issue(&user.id, &user.email)
        .unwrap();
    let err = t
        .app
        .session
        .authenticate(&foreign)
        .await
        .expect_err("foreign signature must fail");
    assert!(matches!(err, VaultError::Unauthenticated));
}
