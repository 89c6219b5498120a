//! Integration tests for the users vertical slice
//!
//! Tests user operations including:
//! - Lookup by username and ID
//! - Uniqueness enforcement by the unique indexes
//! - Partial updates and profile merging
//! - Zero-row outcomes for unknown IDs
//! - Insertion-ordered listing


use serde_json::json;
use std::sync::Arc;
use test_helpers::*;
use warden_core::types::*;
use warden_core::UserStore;
use warden_storage::{MemoryStore, StorageError};

#[tokio::test]
async fn test_create_and_get_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert!(user.profile.is_empty());

    let by_name = warden_storage::users::get_by_username(pool, "alice")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(by_name, user);

    let by_id = warden_storage::users::get_by_id(pool, &user.id)
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(by_id.username, "alice");
}

#[tokio::test]
async fn test_get_nonexistent_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let missing = warden_storage::users::get_by_username(pool, "nonexistent")
        .await
        .unwrap();
    assert!(missing.is_none());

    let missing = warden_storage::users::get_by_id(pool, &UserId::new("nope"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_exists_checks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "alice").await;

    assert!(warden_storage::users::exists_by_username(pool, "alice").await.unwrap());
    assert!(!warden_storage::users::exists_by_username(pool, "bob").await.unwrap());
    assert!(warden_storage::users::exists_by_email(pool, "alice@example.com").await.unwrap());
    assert!(!warden_storage::users::exists_by_email(pool, "bob@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_username_rejected_by_index() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "alice").await;

    let mut dup = new_user("alice");
    dup.email = "different@example.com".to_string();
    let err = warden_storage::users::create(pool, dup).await.unwrap_err();

    assert!(
        matches!(err, StorageError::Duplicate(UniqueField::Username)),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_duplicate_email_rejected_by_index() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "alice").await;

    let mut dup = new_user("bob");
    dup.email = "alice@example.com".to_string();
    let err = warden_storage::users::create(pool, dup).await.unwrap_err();

    assert!(
        matches!(err, StorageError::Duplicate(UniqueField::Email)),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_concurrent_inserts_same_username() {
    let test_db = TestDb::new().await;
    let store = Arc::new(test_db.store.clone());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let mut user = new_user("racer");
                user.email = format!("racer{i}@example.com");
                store.insert(user).await
            })
        })
        .collect();

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) if e.duplicate_field() == Some(UniqueField::Username) => duplicates += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(duplicates, 3);
}

#[tokio::test]
async fn test_update_fields_and_profile() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;

    let mut profile = ProfileFields::new();
    profile.insert("address".to_string(), json!("1 Main St"));
    profile.insert("mobile".to_string(), json!("555-0100"));
    let patch = UserPatch {
        first_name: Some(None),
        last_name: Some(Some("Smith".to_string())),
        profile,
        ..Default::default()
    };
    let updated = warden_storage::users::update(pool, &user.id, &patch).await.unwrap();
    assert_eq!(updated, 1);

    let mut profile = ProfileFields::new();
    profile.insert("mobile".to_string(), serde_json::Value::Null);
    let patch = UserPatch {
        email: Some("alice@new.example.com".to_string()),
        profile,
        ..Default::default()
    };
    warden_storage::users::update(pool, &user.id, &patch).await.unwrap();

    let stored = warden_storage::users::get_by_id(pool, &user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.email, "alice@new.example.com");
    assert_eq!(stored.first_name, None);
    assert_eq!(stored.last_name.as_deref(), Some("Smith"));
    assert_eq!(stored.profile.get("address"), Some(&json!("1 Main St")));
    assert!(!stored.profile.contains_key("mobile"));
    assert_eq!(stored.password_hash, user.password_hash);
    assert_eq!(stored.username, "alice");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_profile_updates_all_land() {
    let test_db = TestDb::new().await;
    let user = create_test_user(test_db.pool(), "alice").await;
    let store = Arc::new(test_db.store.clone());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            let id = user.id.clone();
            tokio::spawn(async move {
                let mut profile = ProfileFields::new();
                profile.insert(format!("key{i}"), json!(i));
                store
                    .update_by_id(
                        &id,
                        UserPatch {
                            profile,
                            ..Default::default()
                        },
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        let updated = handle.await.unwrap().expect("concurrent update failed");
        assert_eq!(updated, 1);
    }

    let stored = test_db.store.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.profile.len(), 16);
    for i in 0..16 {
        assert_eq!(stored.profile[&format!("key{i}")], json!(i));
    }
}

#[tokio::test]
async fn test_nested_profile_merge_matches_memory_store() {
    let test_db = TestDb::new().await;
    let sqlite_user = create_test_user(test_db.pool(), "alice").await;

    let memory = MemoryStore::new();
    let memory_user = memory.insert(new_user("alice")).await.unwrap();

    let mut first = ProfileFields::new();
    first.insert("address".to_string(), json!({ "city": "Paris", "zip": "75001" }));
    first.insert("tags".to_string(), json!("old"));
    let mut second = ProfileFields::new();
    second.insert("address".to_string(), json!({ "zip": null, "street": "Rue 1" }));
    second.insert("tags".to_string(), json!({ "a": 1, "b": null }));

    for profile in [first, second] {
        let patch = UserPatch {
            profile,
            ..Default::default()
        };
        test_db
            .store
            .update_by_id(&sqlite_user.id, patch.clone())
            .await
            .unwrap();
        memory.update_by_id(&memory_user.id, patch).await.unwrap();
    }

    let from_sqlite = test_db.store.find_by_id(&sqlite_user.id).await.unwrap().unwrap();
    let from_memory = memory.find_by_id(&memory_user.id).await.unwrap().unwrap();

    assert_eq!(from_sqlite.profile, from_memory.profile);
    assert_eq!(
        from_sqlite.profile["address"],
        json!({ "city": "Paris", "street": "Rue 1" })
    );
    assert_eq!(from_sqlite.profile["tags"], json!({ "a": 1 }));
}

#[tokio::test]
async fn test_update_email_collision() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;

    let patch = UserPatch {
        email: Some("alice@example.com".to_string()),
        ..Default::default()
    };
    let err = warden_storage::users::update(pool, &bob.id, &patch)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Duplicate(UniqueField::Email)));
}

#[tokio::test]
async fn test_update_and_delete_unknown_id() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let unknown = UserId::new("does-not-exist");

    let updated = warden_storage::users::update(pool, &unknown, &UserPatch::default())
        .await
        .unwrap();
    assert_eq!(updated, 0);

    let deleted = warden_storage::users::delete(pool, &unknown).await.unwrap();
    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn test_delete_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;

    let deleted = warden_storage::users::delete(pool, &user.id).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(warden_storage::users::get_by_id(pool, &user.id)
        .await
        .unwrap()
        .is_none());

    // Username becomes available again
    create_test_user(pool, "alice").await;
}

#[tokio::test]
async fn test_list_is_bounded_and_insertion_ordered() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for name in ["carol", "alice", "bob"] {
        create_test_user(pool, name).await;
    }

    let users = warden_storage::users::list(pool, 2).await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["carol", "alice"]);

    let all = warden_storage::users::list(pool, 10).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_list_empty_database() {
    let test_db = TestDb::new().await;

    let users = test_db.store.list(10).await.unwrap();
    assert!(users.is_empty());
}
