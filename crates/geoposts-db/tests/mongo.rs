//! Storage tests against a live MongoDB.
//!
//! They run when `MONGODB_URI` is set, e.g.
//! `MONGODB_URI=mongodb://127.0.0.1:27017 cargo test -p geoposts-db`,
//! and return early otherwise.

use geoposts_db::models::LocationUpdate;
use geoposts_db::{Database, SeedMode};

async fn scratch_db() -> Option<Database> {
    let Ok(uri) = std::env::var("MONGODB_URI") else {
        eprintln!("MONGODB_URI not set, skipping live storage test");
        return None;
    };
    let name = format!("geoposts_test_{}", uuid::Uuid::new_v4().simple());
    let db = Database::connect(&uri, &name).await.unwrap();
    db.init(SeedMode::Reset).await.unwrap();
    Some(db)
}

#[tokio::test]
async fn brandenburger_tor_is_near_itself() {
    let Some(db) = scratch_db().await else {
        return;
    };

    let results = db
        .find_locations_within_radius(52.516, 13.378, 1000.0, 100)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].description.as_deref(), Some("Brandenburger Tor"));
}

#[tokio::test]
async fn results_are_nearest_first_and_capped() {
    let Some(db) = scratch_db().await else {
        return;
    };

    // 20km around Brandenburger Tor covers all three sample locations.
    let all = db
        .find_locations_within_radius(52.516247, 13.377711, 20_000.0, 100)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].description.as_deref(), Some("Brandenburger Tor"));

    let capped = db
        .find_locations_within_radius(52.516247, 13.377711, 20_000.0, 2)
        .await
        .unwrap();
    assert_eq!(capped.len(), 2);
}

#[tokio::test]
async fn empty_radius_returns_nothing() {
    let Some(db) = scratch_db().await else {
        return;
    };

    let results = db
        .find_locations_within_radius(0.0, 0.0, 10.0, 100)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let Some(db) = scratch_db().await else {
        return;
    };

    let created = db
        .create_location(Some("Cafe X".into()), 52.0, 13.0)
        .await
        .unwrap();
    let fetched = db.get_location(created.id).await.unwrap().unwrap();

    assert_eq!(fetched, created);
    let dict = fetched.to_dict();
    assert_eq!(dict.location.lat, 52.0);
    assert_eq!(dict.location.lng, 13.0);
}

#[tokio::test]
async fn update_and_delete_hit_storage() {
    let Some(db) = scratch_db().await else {
        return;
    };
    let created = db.create_location(None, 10.0, 20.0).await.unwrap();

    let updated = db
        .update_location(
            created.id,
            LocationUpdate {
                description: Some("Renamed".into()),
                position: Some((11.0, 21.0)),
            },
        )
        .await
        .unwrap();
    assert!(updated);

    let fetched = db.get_location(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.description.as_deref(), Some("Renamed"));
    assert_eq!(fetched.latitude(), 11.0);
    assert_eq!(fetched.longitude(), 21.0);

    assert!(db.delete_location(created.id).await.unwrap());
    assert!(!db.delete_location(created.id).await.unwrap());
    assert!(db.get_location(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn seed_if_empty_does_not_duplicate() {
    let Some(db) = scratch_db().await else {
        return;
    };
    db.init(SeedMode::IfEmpty).await.unwrap();

    let all = db
        .find_locations_within_radius(52.516247, 13.377711, 20_000.0, 100)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn posts_get_fresh_timestamps() {
    let Some(db) = scratch_db().await else {
        return;
    };

    let first = db.create_post("One".into(), "First".into()).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = db.create_post("Two".into(), "Second".into()).await.unwrap();

    assert!(second.date_posted > first.date_posted);
}
