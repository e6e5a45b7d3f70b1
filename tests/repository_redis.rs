use std::sync::Arc;
use std::time::Duration;
use snaplink::domain::error::LinkError;
use snaplink::domain::repositories::LinkStore;
use snaplink::infrastructure::persistence::RedisLinkStore;
use snaplink::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Connects to `REDIS_URL` under a fresh key namespace so tests can run in
/// parallel against one server.
async fn test_store() -> RedisLinkStore {
    let url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
    let namespace = format!("test:{}:", RandomCodeGenerator::new(14).generate().unwrap());

    RedisLinkStore::connect_with_namespace(&url, &namespace)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_insert_and_find() {
    let store = test_store().await;

    let created = store.insert("rdTest1", "https://a.test").await.unwrap();
    assert_eq!(created.short_code, "rdTest1");
    assert_eq!(created.clicks, 0);

    let found = store.find_by_code("rdTest1").await.unwrap().unwrap();
    assert_eq!(found.original_url, "https://a.test");
    assert_eq!(found.clicks, 0);
    assert_eq!(
        found.created_at.timestamp_millis(),
        created.created_at.timestamp_millis()
    );
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_insert_duplicate_code() {
    let store = test_store().await;
    store.insert("dupCode", "https://first.test").await.unwrap();

    let result = store.insert("dupCode", "https://second.test").await;

    assert!(matches!(result, Err(LinkError::DuplicateCode(ref c)) if c == "dupCode"));
    let kept = store.find_by_code("dupCode").await.unwrap().unwrap();
    assert_eq!(kept.original_url, "https://first.test");
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_find_and_increment() {
    let store = test_store().await;
    store.insert("incr123", "https://a.test").await.unwrap();

    let first = store.find_and_increment("incr123").await.unwrap().unwrap();
    let second = store.find_and_increment("incr123").await.unwrap().unwrap();

    assert_eq!(first.clicks, 1);
    assert_eq!(second.clicks, 2);
    assert_eq!(second.original_url, "https://a.test");
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_find_and_increment_missing_creates_nothing() {
    let store = test_store().await;

    assert!(store.find_and_increment("missing").await.unwrap().is_none());
    assert!(store.find_by_code("missing").await.unwrap().is_none());
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires REDIS_URL"]
async fn test_concurrent_increments() {
    let store = Arc::new(test_store().await);
    store.insert("race123", "https://a.test").await.unwrap();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.find_and_increment("race123").await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let record = store.find_by_code("race123").await.unwrap().unwrap();
    assert_eq!(record.clicks, 50);
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_list_all_newest_first() {
    let store = test_store().await;
    store.insert("older12", "https://old.test").await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    store.insert("newer12", "https://new.test").await.unwrap();
    store.find_and_increment("older12").await.unwrap();

    let records = store.list_all().await.unwrap();

    let codes: Vec<_> = records.iter().map(|r| r.short_code.as_str()).collect();
    assert_eq!(codes, ["newer12", "older12"]);
    assert_eq!(records[1].clicks, 1);
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_health_check() {
    let store = test_store().await;
    assert!(store.health_check().await);
}
