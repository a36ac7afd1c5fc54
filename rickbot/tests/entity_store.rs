//! Integration tests for EntityStore: key rules, absent files, annotation writes, overwrite on save.

#[path = "common/mod.rs"]
mod common;

use rickbot::entity::{EntityRecord, EntityType, Location};
use rickbot::store::{EntityStore, StoreError};
use serde_json::{json, Value};

async fn seeded_store() -> (tempfile::TempDir, EntityStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = EntityStore::new(dir.path());
    store.save(EntityType::Locations, &common::locations_data()).await.unwrap();
    store.save(EntityType::Episodes, &common::episodes_data()).await.unwrap();
    store.save(EntityType::Characters, &common::characters_data()).await.unwrap();
    (dir, store)
}

fn names(records: &[EntityRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name()).collect()
}

/// **Scenario**: characters and locations match on exact name only.
#[tokio::test]
async fn read_matches_name_for_characters_and_locations() {
    let (_dir, store) = seeded_store().await;
    let found = store.read(EntityType::Characters, "Rick Sanchez").await.unwrap();
    assert_eq!(names(&found), vec!["Rick Sanchez"]);

    let found = store.read(EntityType::Locations, "Purge Planet").await.unwrap();
    assert_eq!(names(&found), vec!["Purge Planet"]);

    let none = store.read(EntityType::Locations, "purge planet").await.unwrap();
    assert!(none.is_empty(), "matching is exact, case included");
}

/// **Scenario**: an episode matches on name, air date or episode code.
#[tokio::test]
async fn read_episode_matches_any_of_three_fields() {
    let (_dir, store) = seeded_store().await;
    for key in ["Meeseeks and Destroy", "January 20, 2014", "S01E05"] {
        let found = store.read(EntityType::Episodes, key).await.unwrap();
        assert_eq!(names(&found), vec!["Meeseeks and Destroy"], "key {}", key);
    }
    let found = store.read(EntityType::Episodes, "S01E01").await.unwrap();
    assert_eq!(names(&found), vec!["Pilot"]);
}

/// **Scenario**: reading a type whose file was never fetched yields an empty sequence.
#[tokio::test]
async fn read_absent_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = EntityStore::new(dir.path());
    for entity_type in EntityType::ALL {
        assert!(store.read(entity_type, "anything").await.unwrap().is_empty());
    }
}

/// **Scenario**: writing "totally sweet" on Anatomy Park returns the confirmation,
/// persists the detail and leaves every other record unchanged.
#[tokio::test]
async fn write_anatomy_park_detail() {
    let (_dir, store) = seeded_store().await;
    let before = store.load::<Location>().await.unwrap().unwrap();

    let entity_type: EntityType = "locations".parse().unwrap();
    let msg = store
        .write(entity_type, "Anatomy Park", "totally sweet")
        .await
        .unwrap();
    assert_eq!(
        msg,
        "Successfully stored detail totally sweet for Anatomy Park in locations."
    );

    let after = store.load::<Location>().await.unwrap().unwrap();
    assert_eq!(after.info, before.info);
    assert_eq!(after.results.len(), before.results.len());
    for (old, new) in before.results.iter().zip(&after.results) {
        if new.name == "Anatomy Park" {
            assert_eq!(new.detail.as_deref(), Some("totally sweet"));
            let mut expected = old.clone();
            expected.detail = Some("totally sweet".to_string());
            assert_eq!(new, &expected);
        } else {
            assert_eq!(new, old);
        }
    }

    let read = store.read(EntityType::Locations, "Anatomy Park").await.unwrap();
    assert_eq!(read[0].detail(), Some("totally sweet"));
}

/// **Scenario**: writing to a name that is not stored fails with a lookup error
/// and leaves the file untouched. No record is created.
#[tokio::test]
async fn write_missing_key_is_lookup_failure() {
    let (_dir, store) = seeded_store().await;
    let path = store.path_for(EntityType::Locations);
    let before = tokio::fs::read(&path).await.unwrap();

    let err = store
        .write(EntityType::Locations, "Blips and Chitz", "fun")
        .await
        .unwrap_err();
    match err {
        StoreError::Lookup { entity_type, key } => {
            assert_eq!(entity_type, EntityType::Locations);
            assert_eq!(key, "Blips and Chitz");
        }
        other => panic!("expected Lookup, got {:?}", other),
    }
    assert_eq!(tokio::fs::read(&path).await.unwrap(), before);
}

/// **Scenario**: writing before any fetch reports a cache miss.
#[tokio::test]
async fn write_absent_file_is_cache_miss() {
    let dir = tempfile::tempdir().unwrap();
    let store = EntityStore::new(dir.path());
    let err = store
        .write(EntityType::Characters, "Rick Sanchez", "genius")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::CacheMiss { entity_type: EntityType::Characters, .. }));
}

/// **Scenario**: save replaces stale content wholesale; old records and annotations are gone.
#[tokio::test]
async fn save_overwrites_whole_file() {
    let (_dir, store) = seeded_store().await;
    store
        .write(EntityType::Locations, "Anatomy Park", "totally sweet")
        .await
        .unwrap();

    let fresh = json!({
        "locations": {
            "info": { "count": 1, "pages": 1, "next": null, "prev": null },
            "results": [
                { "id": "20", "name": "Earth (Replacement Dimension)", "type": "Planet",
                  "dimension": "Replacement Dimension", "residents": [] }
            ]
        }
    });
    store.save(EntityType::Locations, &fresh).await.unwrap();

    assert!(store.read(EntityType::Locations, "Anatomy Park").await.unwrap().is_empty());
    let set = store.load::<Location>().await.unwrap().unwrap();
    assert_eq!(set.results.len(), 1);

    let raw: Value =
        serde_json::from_slice(&tokio::fs::read(store.path_for(EntityType::Locations)).await.unwrap())
            .unwrap();
    assert_eq!(raw["locations"]["results"].as_array().unwrap().len(), 1);
    assert!(!raw.to_string().contains("totally sweet"));
}

/// **Scenario**: the stored file is pretty-printed and keyed by the plural type name.
#[tokio::test]
async fn saved_file_is_pretty_printed_envelope() {
    let (_dir, store) = seeded_store().await;
    let text = tokio::fs::read_to_string(store.path_for(EntityType::Episodes))
        .await
        .unwrap();
    assert!(text.starts_with("{\n"));
    let raw: Value = serde_json::from_str(&text).unwrap();
    assert!(raw.get("episodes").is_some());
    assert!(raw["episodes"]["results"][0].get("detail").is_none());
}

/// **Scenario**: fields outside the typed schema survive a write, on the annotated
/// record and on the records the write never touched.
#[tokio::test]
async fn write_keeps_fields_outside_schema() {
    let dir = tempfile::tempdir().unwrap();
    let store = EntityStore::new(dir.path());
    let path = store.path_for(EntityType::Locations);
    let seeded = json!({
        "locations": {
            "info": { "count": 2, "pages": 1, "next": null, "prev": null },
            "results": [
                { "id": "5", "name": "Anatomy Park", "type": "Microverse",
                  "dimension": "Dimension C-137", "residents": [],
                  "url": "https://rickandmortyapi.com/api/location/5",
                  "created": "2017-11-10T13:08:46.060Z" },
                { "id": "9", "name": "Purge Planet", "type": "Planet",
                  "dimension": "Replacement Dimension", "residents": [],
                  "url": "https://rickandmortyapi.com/api/location/9",
                  "created": "2017-11-10T13:09:29.566Z" }
            ]
        }
    });
    tokio::fs::write(&path, serde_json::to_vec_pretty(&seeded).unwrap())
        .await
        .unwrap();

    store
        .write(EntityType::Locations, "Anatomy Park", "totally sweet")
        .await
        .unwrap();

    let raw: Value = serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
    let results = raw["locations"]["results"].as_array().unwrap();
    assert_eq!(results[0]["detail"], "totally sweet");
    assert_eq!(results[0]["url"], "https://rickandmortyapi.com/api/location/5");
    assert_eq!(results[0]["created"], "2017-11-10T13:08:46.060Z");
    assert_eq!(results[1], seeded["locations"]["results"][1]);
    assert_eq!(raw["locations"]["info"], seeded["locations"]["info"]);
}

/// **Scenario**: a record stored with nothing but its name can still be annotated.
#[tokio::test]
async fn write_annotates_name_only_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = EntityStore::new(dir.path());
    let path = store.path_for(EntityType::Locations);
    tokio::fs::write(&path, br#"{"locations":{"results":[{"name":"Anatomy Park"}]}}"#)
        .await
        .unwrap();

    let msg = store
        .write(EntityType::Locations, "Anatomy Park", "totally sweet")
        .await
        .unwrap();
    assert_eq!(
        msg,
        "Successfully stored detail totally sweet for Anatomy Park in locations."
    );

    let raw: Value = serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
    assert_eq!(
        raw,
        json!({"locations": {"results": [{"name": "Anatomy Park", "detail": "totally sweet"}]}})
    );
}
