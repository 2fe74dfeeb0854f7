//! Drop sequences covering mission/manifest ordering, merging and sweeping.

use crate::test_utils::{DropFixture, DROP_BUCKET, SECRET_BUCKET};
use jedi_core::{DropResponse, Error, Mission, ObjectStore};
use serde_json::json;

#[tokio::test]
async fn test_mission_then_manifest_resolves_planet() {
    let fixture = DropFixture::new();

    let response = fixture.drop_file("mission", "alpha").await.unwrap();
    assert_eq!(response, None);
    assert_eq!(fixture.stored_mission().await, Some(Mission::from("alpha")));
    assert!(fixture.stored_manifest().await.is_none());
    assert!(fixture.drop_bucket_is_empty());

    let response = fixture
        .drop_manifest(json!({ "alpha": { "planet": "Tatooine" } }))
        .await
        .unwrap();
    assert_eq!(response, Some(DropResponse::located("Tatooine")));
    assert!(fixture.drop_bucket_is_empty());
}

#[tokio::test]
async fn test_manifest_then_mission_resolves_planet() {
    let fixture = DropFixture::new();

    let response = fixture
        .drop_manifest(json!({ "alpha": { "planet": "Tatooine" } }))
        .await
        .unwrap();
    assert_eq!(response, None);

    let response = fixture.drop_file("mission", "alpha\n").await.unwrap();
    assert_eq!(response, Some(DropResponse::located("Tatooine")));
}

#[tokio::test]
async fn test_manifest_without_mission_is_stored_verbatim() {
    let fixture = DropFixture::new();

    let response = fixture
        .drop_manifest(json!({ "beta": { "planet": "Hoth", "sector": "Anoat" } }))
        .await
        .unwrap();

    assert_eq!(response, None);
    assert!(fixture.stored_mission().await.is_none());
    let stored = serde_json::to_value(fixture.stored_manifest().await.unwrap()).unwrap();
    assert_eq!(stored, json!({ "beta": { "planet": "Hoth", "sector": "Anoat" } }));
    assert!(fixture.drop_bucket_is_empty());
}

#[tokio::test]
async fn test_manifests_without_mission_replace_each_other() {
    let fixture = DropFixture::new();

    fixture
        .drop_manifest(json!({ "beta": { "planet": "Hoth" } }))
        .await
        .unwrap();
    let response = fixture
        .drop_manifest(json!({ "gamma": { "planet": "Endor" } }))
        .await
        .unwrap();
    assert_eq!(response, None);

    let stored = fixture.stored_manifest().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(!stored.contains(&Mission::from("beta")));

    let response = fixture.drop_file("mission", "beta").await.unwrap();
    assert_eq!(response, None);
    assert_eq!(fixture.stored_mission().await, Some(Mission::from("beta")));
    assert!(fixture.drop_bucket_is_empty());
}

#[tokio::test]
async fn test_later_manifest_supplies_missing_objective() {
    let fixture = DropFixture::new();
    fixture.drop_file("mission", "kappa").await.unwrap();

    let response = fixture
        .drop_manifest(json!({ "alpha": { "planet": "Tatooine" } }))
        .await
        .unwrap();
    assert_eq!(response, None);

    let response = fixture
        .drop_manifest(json!({ "kappa": { "planet": "Mustafar" } }))
        .await
        .unwrap();
    assert_eq!(response, Some(DropResponse::located("Mustafar")));

    let stored = fixture.stored_manifest().await.unwrap();
    assert!(stored.contains(&Mission::from("alpha")));
    assert_eq!(
        stored.locate(&Mission::from("kappa")).unwrap().unwrap().planet,
        "Mustafar"
    );
}

#[tokio::test]
async fn test_incoming_manifest_overrides_stored_entry() {
    let fixture = DropFixture::new();
    fixture.drop_file("mission", "alpha").await.unwrap();
    fixture
        .drop_manifest(json!({ "alpha": { "planet": "Tatooine" }, "beta": { "planet": "Hoth" } }))
        .await
        .unwrap();

    let response = fixture
        .drop_manifest(json!({ "alpha": { "planet": "Jedha" } }))
        .await
        .unwrap();

    assert_eq!(response, Some(DropResponse::located("Jedha")));
    let stored = fixture.stored_manifest().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(
        stored.locate(&Mission::from("beta")).unwrap().unwrap().planet,
        "Hoth"
    );
}

#[tokio::test]
async fn test_new_mission_replaces_old_one() {
    let fixture = DropFixture::new();
    fixture
        .drop_manifest(json!({
            "alpha": { "planet": "Tatooine" },
            "beta": { "planet": "Hoth" }
        }))
        .await
        .unwrap();

    let first = fixture.drop_file("mission", "alpha").await.unwrap();
    assert_eq!(first, Some(DropResponse::located("Tatooine")));

    let second = fixture.drop_file("mission", "beta").await.unwrap();
    assert_eq!(second, Some(DropResponse::located("Hoth")));
    assert_eq!(fixture.stored_mission().await, Some(Mission::from("beta")));
}

#[tokio::test]
async fn test_secrets_are_not_stored_in_plaintext() {
    let fixture = DropFixture::new();
    fixture.drop_file("mission", "alpha").await.unwrap();
    fixture
        .drop_manifest(json!({ "alpha": { "planet": "Tatooine" } }))
        .await
        .unwrap();

    let mission = fixture.store().object(SECRET_BUCKET, "mission").unwrap();
    let manifest = fixture.store().object(SECRET_BUCKET, "manifest").unwrap();
    assert_ne!(&mission[..], b"alpha");
    assert!(!String::from_utf8_lossy(&manifest).contains("Tatooine"));
}

#[tokio::test]
async fn test_every_branch_empties_drop_bucket() {
    let fixture = DropFixture::new();
    let drops = [
        ("notes.txt", "not a secret"),
        ("manifest", r#"{"alpha": {"planet": "Tatooine"}}"#),
        ("mission", "beta"),
        ("mission", "alpha"),
        ("manifest", r#"{"beta": {"planet": "Hoth"}}"#),
    ];

    for (key, body) in drops {
        fixture
            .store()
            .put(DROP_BUCKET, "stray", bytes::Bytes::from_static(b"x"))
            .await
            .unwrap();
        fixture.drop_file(key, body).await.unwrap();
        assert!(fixture.drop_bucket_is_empty(), "drop of {} left objects", key);
    }
}

#[tokio::test]
async fn test_malformed_manifest_fails_invocation() {
    let fixture = DropFixture::new();
    fixture.drop_file("mission", "alpha").await.unwrap();

    let err = fixture.drop_file("manifest", "[1, 2,").await.unwrap_err();

    assert!(matches!(err, Error::MalformedInput(_)));
    assert!(fixture.stored_manifest().await.is_none());
    assert!(!fixture.drop_bucket_is_empty());
}

#[tokio::test]
async fn test_manifest_with_non_record_entry_still_resolves() {
    let fixture = DropFixture::new();
    fixture.drop_file("mission", "alpha").await.unwrap();

    let response = fixture
        .drop_manifest(json!({ "alpha": { "planet": "Tatooine" }, "note": "v2" }))
        .await
        .unwrap();

    assert_eq!(response, Some(DropResponse::located("Tatooine")));
    assert!(fixture.drop_bucket_is_empty());
    let stored = serde_json::to_value(fixture.stored_manifest().await.unwrap()).unwrap();
    assert_eq!(stored["note"], json!("v2"));
}
