//! Cards vault: both secret fields encrypted, dates and flags round-trip.

mod common;

use chrono::NaiveDate;
use common::{signed_up, test_app};
use kh_vault::cards::{CreateCard, UpdateCard};
use kh_vault::VaultError;

fn dto(title: &str) -> CreateCard {
    CreateCard {
        title: title.into(),
        name: "Ann Example".into(),
        number: "4111111111111111".into(),
        cvc: "123".into(),
        expiration: NaiveDate::from_ymd_opt(2028, 11, 30).unwrap(),
        password: "c4rd_p4ss".into(),
        is_credit: true,
        is_debit: false,
    }
}

#[tokio::test]
async fn create_encrypts_both_secret_fields() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    let created = t
        .app
        .cards
        .create(&dto("visa"), &user.id)
        .await
        .expect("create card");
    assert_eq!(created.cvc, "123");
    assert_eq!(created.password, "c4rd_p4ss");
    assert_eq!(created.expiration, NaiveDate::from_ymd_opt(2028, 11, 30).unwrap());
    assert!(created.is_credit);
    assert!(!created.is_debit);

    let row = t
        .store
        .find_card_by_id(&created.id)
        .await
        .expect("query row")
        .expect("row exists");
    assert_ne!(row.cvc_enc, "123");
    assert_ne!(row.password_enc, "c4rd_p4ss");
    // The number is metadata, stored as-is.
    assert_eq!(row.number, "4111111111111111");

    let fetched = t
        .app
        .cards
        .get_one(&created.id, &user.id)
        .await
        .expect("get one");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_all_decrypts_every_card() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    for title in ["visa", "mastercard"] {
        t.app
            .cards
            .create(&dto(title), &user.id)
            .await
            .expect("create card");
    }

    let all = t.app.cards.list_all(&user.id).await.expect("list all");
    assert_eq!(all.len(), 2);
    for card in &all {
        assert_eq!(card.cvc, "123");
        assert_eq!(card.password, "c4rd_p4ss");
    }
}

#[tokio::test]
async fn duplicate_title_per_owner_is_a_conflict() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    t.app
        .cards
        .create(&dto("visa"), &user.id)
        .await
        .expect("create card");
    let err = t
        .app
        .cards
        .create(&dto("visa"), &user.id)
        .await
        .expect_err("duplicate title must fail");
    assert!(matches!(err, VaultError::Conflict(_)));
}

#[tokio::test]
async fn foreign_cards_are_forbidden() {
    let t = test_app().await;
    let ann = signed_up(&t.app, "Ann", "ann@x.com").await;
    let bob = signed_up(&t.app, "Bob", "bob@x.com").await;

    let created = t
        .app
        .cards
        .create(&dto("visa"), &ann.id)
        .await
        .expect("create card");

    let get = t.app.cards.get_one(&created.id, &bob.id).await;
    assert!(matches!(get, Err(VaultError::Forbidden(_))));
    let remove = t.app.cards.remove(&created.id, &bob.id).await;
    assert!(matches!(remove, Err(VaultError::Forbidden(_))));
}

#[tokio::test]
async fn missing_id_is_not_found() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    let err = t
        .app
        .cards
        .get_one("no-such-id", &user.id)
        .await
        .expect_err("missing id must fail");
    assert!(matches!(err, VaultError::NotFound(_)));
}

#[tokio::test]
async fn update_reencrypts_only_supplied_secrets() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    let created = t
        .app
        .cards
        .create(&dto("visa"), &user.id)
        .await
        .expect("create card");
    let before = t.store.find_card_by_id(&created.id).await.unwrap().unwrap();

    let updated = t
        .app
        .cards
        .update(
            &created.id,
            &UpdateCard {
                cvc: Some("999".into()),
                ..Default::default()
            },
            &user.id,
        )
        .await
        .expect("update card");
    assert_eq!(updated.cvc, "999");
    assert_eq!(updated.password, "c4rd_p4ss");

    let after = t.store.find_card_by_id(&created.id).await.unwrap().unwrap();
    assert_ne!(after.cvc_enc, before.cvc_enc);
    // The untouched secret column is untouched ciphertext.
    assert_eq!(after.password_enc, before.password_enc);
}

#[tokio::test]
async fn remove_deletes_the_card() {
    let t = test_app().await;
    let user = signed_up(&t.app, "Ann", "ann@x.com").await;

    let created = t
        .app
        .cards
        .create(&dto("visa"), &user.id)
        .await
        .expect("create card");
    t.app
        .cards
        .remove(&created.id, &user.id)
        .await
        .expect("remove card");

    let err = t
        .app
        .cards
        .get_one(&created.id, &user.id)
        .await
        .expect_err("removed card is gone");
    assert!(matches!(err, VaultError::NotFound(_)));
}
