//! Tests for the quota gate and usage counters.

use garb_core::UserId;
use garb_quota::{day_key, MemoryUsageStore, QuotaGate, UsageStore, DEFAULT_DAILY_LIMIT};
use std::sync::Arc;

#[tokio::test]
async fn fresh_user_is_allowed() {
    let gate = QuotaGate::new(Arc::new(MemoryUsageStore::new()));
    let status = gate.check(&UserId::new()).await.unwrap();
    assert!(status.allowed);
    assert_eq!(status.used, 0);
    assert_eq!(status.limit, DEFAULT_DAILY_LIMIT);
}

#[tokio::test]
async fn gate_refuses_at_the_limit() {
    let gate = QuotaGate::with_limit(Arc::new(MemoryUsageStore::new()), 2);
    let user = UserId::new();

    gate.record(&user).await.unwrap();
    assert!(gate.check(&user).await.unwrap().allowed);

    gate.record(&user).await.unwrap();
    let status = gate.check(&user).await.unwrap();
    assert!(!status.allowed);
    assert_eq!(status.used, 2);
    assert_eq!(status.limit, 2);
}

#[tokio::test]
async fn users_do_not_share_counters() {
    let gate = QuotaGate::with_limit(Arc::new(MemoryUsageStore::new()), 1);
    let alice = UserId::new();
    let bob = UserId::new();

    gate.record(&alice).await.unwrap();
    assert!(!gate.check(&alice).await.unwrap().allowed);
    assert!(gate.check(&bob).await.unwrap().allowed);
}

#[tokio::test]
async fn concurrent_increments_sum_exactly() {
    let store = Arc::new(MemoryUsageStore::new());
    let gate = QuotaGate::with_limit(store.clone(), 1000);
    let user = UserId::new();

    let mut handles = Vec::new();
    for _ in 0..100 {
        let gate = gate.clone();
        handles.push(tokio::spawn(async move { gate.record(&user).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.count(&user, &day_key()).await.unwrap(), 100);
}

#[tokio::test]
async fn distinct_days_use_distinct_rows() {
    let store = MemoryUsageStore::new();
    let user = UserId::new();

    store.increment(&user, "2024-01-01").await.unwrap();
    store.increment(&user, "2024-01-02").await.unwrap();
    store.increment(&user, "2024-01-02").await.unwrap();

    assert_eq!(store.count(&user, "2024-01-01").await.unwrap(), 1);
    assert_eq!(store.count(&user, "2024-01-02").await.unwrap(), 2);
    assert_eq!(store.count(&user, "2024-01-03").await.unwrap(), 0);
}
