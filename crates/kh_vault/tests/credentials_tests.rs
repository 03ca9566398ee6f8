//! Credentials vault: ownership, title uniqueness, encryption at rest.

mod common;

use common::{signed_up, test_app};
use kh_vault::credentials::{CreateCredential, UpdateCredential};
use kh_vault::VaultError;

fn dto(title: &str) -> CreateCredential {
    CreateCredential {
        title: title.into(),
        url: "https://example.com".into(),
        username: "ann".into(),
        password: "M1Nh4s3nh4_aqui".into(),
    }
}

#[tokio::test]
async fn create_encrypts_at_rest_and_returns_plaintext() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    let created = t
        .app
        .credentials
        .create(&dto("bank"), &user.id)
        .await
        .expect("create credential");
    assert_eq!(created.password, "M1Nh4s3nh4_aqui");
    assert_eq!(created.user_id, user.id);

    let row = t
        .store
        .find_credential_by_id(&created.id)
        .await
        .expect("query row")
        .expect("row exists");
    assert_ne!(row.password_enc, "M1Nh4s3nh4_aqui");
    assert!(!row.password_enc.is_empty());

    let fetched = t
        .app
        .credentials
        .get_one(&created.id, &user.id)
        .await
        .expect("get one");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_all_decrypts_every_record() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    for title in ["bank", "mail", "forum"] {
        t.app
            .credentials
            .create(&dto(title), &user.id)
            .await
            .expect("create credential");
    }

    let all = t
        .app
        .credentials
        .list_all(&user.id)
        .await
        .expect("list all");
    assert_eq!(all.len(), 3);
    for credential in &all {
        assert_eq!(credential.password, "M1Nh4s3nh4_aqui");
    }
}

#[tokio::test]
async fn title_is_unique_per_owner_not_globally() {
    let t = test_app().await;
    let ann = signed_up(&t.app, "Ann", "ann@x.com").await;
    let bob = signed_up(&t.app, "Bob", "bob@x.com").await;

    t.app
        .credentials
        .create(&dto("bank"), &ann.id)
        .await
        .expect("ann creates bank");
    // A different owner may reuse the title.
    t.app
        .credentials
        .create(&dto("bank"), &bob.id)
        .await
        .expect("bob creates bank");

    let err = t
        .app
        .credentials
        .create(&dto("bank"), &ann.id)
        .await
        .expect_err("duplicate title for ann must fail");
    assert!(matches!(err, VaultError::Conflict(_)));
}

#[tokio::test]
async fn foreign_records_are_forbidden_never_not_found() {
    let t = test_app().await;
    let ann = signed_up(&t.app, "Ann", "ann@x.com").await;
    let bob = signed_up(&t.app, "Bob", "bob@x.com").await;

    let created = t
        .app
        .credentials
        .create(&dto("bank"), &ann.id)
        .await
        .expect("create credential");

    let get = t.app.credentials.get_one(&created.id, &bob.id).await;
    assert!(matches!(get, Err(VaultError::Forbidden(_))));

    let update = t
        .app
        .credentials
        .update(&created.id, &UpdateCredential::default(), &bob.id)
        .await;
    assert!(matches!(update, Err(VaultError::Forbidden(_))));

    let remove = t.app.credentials.remove(&created.id, &bob.id).await;
    assert!(matches!(remove, Err(VaultError::Forbidden(_))));

    // Ann still owns an intact record.
    let fetched = t
        .app
        .credentials
        .get_one(&created.id, &ann.id)
        .await
        .expect("owner still reads");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_id_is_not_found() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    let err = t
        .app
        .credentials
        .get_one("no-such-id", &user.id)
        .await
        .expect_err("missing id must fail");
    assert!(matches!(err, VaultError::NotFound(_)));
}

#[tokio::test]
async fn update_reencrypts_supplied_password_only() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    let created = t
        .app
        .credentials
        .create(&dto("bank"), &user.id)
        .await
        .expect("create credential");
    let before = t
        .store
        .find_credential_by_id(&created.id)
        .await
        .unwrap()
        .unwrap();

    let updated = t
        .app
        .credentials
        .update(
            &created.id,
            &UpdateCredential {
                password: Some("n3w_p4ss".into()),
                ..Default::default()
            },
            &user.id,
        )
        .await
        .expect("update credential");
    assert_eq!(updated.password, "n3w_p4ss");
    // Untouched fields survive the partial update.
    assert_eq!(updated.title, "bank");
    assert_eq!(updated.username, "ann");

    let after = t
        .store
        .find_credential_by_id(&created.id)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(after.password_enc, before.password_enc);
    assert_ne!(after.password_enc, "n3w_p4ss");
}

#[tokio::test]
async fn update_into_taken_title_is_a_conflict() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    t.app
        .credentials
        .create(&dto("bank"), &user.id)
        .await
        .expect("create first");
    let second = t
        .app
        .credentials
        .create(&dto("mail"), &user.id)
        .await
        .expect("create second");

    // No pre-check on update: the schema constraint is the backstop.
    let err = t
        .app
        .credentials
        .update(
            &second.id,
            &UpdateCredential {
                title: Some("bank".into()),
                ..Default::default()
            },
            &user.id,
        )
        .await
        .expect_err("title collision must fail");
    assert!(matches!(err, VaultError::Conflict(_)));
}

#[tokio::test]
async fn remove_deletes_the_record() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    let created = t
        .app
        .credentials
        .create(&dto("bank"), &user.id)
        .await
        .expect("create credential");
    t.app
        .credentials
        .remove(&created.id, &user.id)
        .await
        .expect("remove credential");

    let err = t
        .app
        .credentials
        .get_one(&created.id, &user.id)
        .await
        .expect_err("removed record is gone");
    assert!(matches!(err, VaultError::NotFound(_)));
}
