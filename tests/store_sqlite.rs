//! Relational record store on a throwaway sqlite database file.

use academy_player_web::{Gender, PlayerRecord, RecordStore, SqliteStore, StoreError, NO_PHOTO};
use chrono::{NaiveDate, Utc};

fn record(id: u32, name: &str) -> PlayerRecord {
    PlayerRecord {
        id,
        name: name.to_string(),
        photo: NO_PHOTO.to_string(),
        national_id: None,
        date_of_birth: NaiveDate::from_ymd_opt(2013, 3, 2).unwrap(),
        age: 12,
        gender: Gender::Male,
        phone_number: "0100000000".to_string(),
        address: "Giza".to_string(),
        father_name: "Mahmoud Ali".to_string(),
        father_national_id: Some("27005051234567".to_string()),
        father_job: "Engineer".to_string(),
        mother_name: "Mona Said".to_string(),
        mother_national_id: None,
        mother_job: "Teacher".to_string(),
        sport: "Karate".to_string(),
        belt_degree: "أخضر 6".to_string(),
        player_number: None,
        subscription_fee: 400.0,
        registration_date: None,
    }
}

async fn store_in(dir: &tempfile::TempDir) -> SqliteStore {
    let url = format!("sqlite:{}?mode=rwc", dir.path().join("players.db").display());
    SqliteStore::connect(&url).await.unwrap()
}

#[tokio::test]
async fn insert_assigns_registration_date() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir).await;

    store.insert(&record(1, "Ahmed Ali Hassan")).await.unwrap();
    let found = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(found.registration_date, Some(Utc::now().date_naive()));
    assert_eq!(found.name, "Ahmed Ali Hassan");
    assert_eq!(found.father_national_id.as_deref(), Some("27005051234567"));
}

#[tokio::test]
async fn search_matches_id_substring_ordered_desc() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir).await;
    for id in [1, 5, 10, 21] {
        store.insert(&record(id, &format!("Player {id}"))).await.unwrap();
    }

    let ids: Vec<u32> = store
        .search("1")
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![21, 10, 1]);
}

#[tokio::test]
async fn update_and_delete_report_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir).await;

    assert!(matches!(
        store.update(7, &record(7, "Nobody At All")).await,
        Err(StoreError::NotFound(7))
    ));
    assert!(matches!(store.delete(7).await, Err(StoreError::NotFound(7))));
}

#[tokio::test]
async fn update_overwrites_all_mutable_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir).await;
    store.insert(&record(1, "Ahmed Ali Hassan")).await.unwrap();

    let mut updated = record(1, "Ahmed Ali Hassan");
    updated.photo = "uploads/1.png".to_string();
    updated.gender = Gender::Female;
    updated.subscription_fee = 150.25;
    store.update(1, &updated).await.unwrap();

    let found = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(found.photo, "uploads/1.png");
    assert_eq!(found.gender, Gender::Female);
    assert_eq!(found.subscription_fee, 150.25);
    // Registration date is store-owned and survives the update.
    assert_eq!(found.registration_date, Some(Utc::now().date_naive()));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir).await;
    store.insert(&record(1, "Ahmed Ali Hassan")).await.unwrap();

    store.delete(1).await.unwrap();
    assert!(store.find_by_id(1).await.unwrap().is_none());
    assert!(store.all().await.unwrap().is_empty());
}
