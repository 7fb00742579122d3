//! Integration tests exercising the storage components against one shared
//! database file, the way concurrent service instances use them.

use custodian_domain::{Cleaner, ExpiredIdSource};
use custodian_store::{ConnProvider, ExpiredRecordSource, Locker, RecordCleaner};
use rusqlite::params;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn setup_records(provider: &ConnProvider) {
    provider
        .with_retry(|conn| {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS results (id TEXT NOT NULL, created_at INTEGER NOT NULL)",
            )
        })
        .unwrap();
}

fn insert_record(provider: &ConnProvider, id: &str, age: Duration) {
    let created_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
        - age.as_secs() as i64;
    provider
        .with_retry(|conn| {
            conn.execute(
                "INSERT INTO results (id, created_at) VALUES (?1, ?2)",
                params![id, created_at],
            )
        })
        .unwrap();
}

#[test]
fn test_discover_then_clean_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ConnProvider::new(dir.path().join("custodian.db")));
    setup_records(&provider);
    insert_record(&provider, "abc", Duration::from_secs(2 * 3600));
    insert_record(&provider, "fresh", Duration::from_secs(30 * 60));

    let source = ExpiredRecordSource::new(Arc::clone(&provider), "results").unwrap();
    let cleaner = RecordCleaner::new(Arc::clone(&provider), "results").unwrap();

    let ids = source.expired_ids(Duration::from_secs(3600)).unwrap();
    assert_eq!(ids, vec!["abc".to_string()]);

    for id in &ids {
        cleaner.clean(id).unwrap();
    }

    let ids = source.expired_ids(Duration::from_secs(3600)).unwrap();
    assert!(ids.is_empty());
}

#[test]
fn test_concurrent_lock_single_winner() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locks.db");
    let locker = Arc::new(Locker::new(Arc::new(ConnProvider::new(&path)), "locks").unwrap());

    let id = uuid::Uuid::new_v4().to_string();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let locker = Arc::clone(&locker);
        let id = id.clone();
        handles.push(thread::spawn(move || locker.lock(&id, "email").unwrap()));
    }

    let acquired = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|&won| won)
        .count();
    assert_eq!(acquired, 1);
}

#[test]
fn test_lock_across_separate_connections() {
    // two providers on one file stand in for two service processes
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locks.db");
    let first = Locker::new(Arc::new(ConnProvider::new(&path)), "locks").unwrap();
    let second = Locker::new(Arc::new(ConnProvider::new(&path)), "locks").unwrap();

    assert!(first.lock("abc", "email").unwrap());
    assert!(!second.lock("abc", "email").unwrap());

    first.unlock("abc", "email", 2).unwrap();
    assert!(!second.lock("abc", "email").unwrap());
}

#[test]
fn test_lock_race_across_separate_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locks.db");

    let id = uuid::Uuid::new_v4().to_string();
    let mut handles = Vec::new();
    for _ in 0..4 {
        let path = path.clone();
        let id = id.clone();
        handles.push(thread::spawn(move || {
            let locker = Locker::new(Arc::new(ConnProvider::new(&path)), "locks").unwrap();
            locker.lock(&id, "email").unwrap()
        }));
    }

    let acquired = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|&won| won)
        .count();
    assert_eq!(acquired, 1);
}
