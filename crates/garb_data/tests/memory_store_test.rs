//! Tests for the in-memory record stores.

use chrono::{Duration, Utc};
use garb_core::{
    build_outfit_prompt, ClothingCategory, ClothingItem, Generation, GenerationMode,
    GenerationStatus, ImageId, UserId,
};
use garb_data::{GenerationStore, MemoryClothingItemStore, MemoryGenerationStore};
use garb_data::ClothingItemStore;
use garb_error::GarbErrorKind;

fn outfit_generation(user_id: UserId) -> Generation {
    Generation::new(user_id, GenerationMode::Outfit, build_outfit_prompt())
}

#[tokio::test]
async fn insert_and_get() {
    let store = MemoryGenerationStore::new();
    let generation = outfit_generation(UserId::new());
    let id = generation.id;

    store.insert(generation.clone()).await.unwrap();
    assert_eq!(store.get(&id).await.unwrap(), Some(generation));
}

#[tokio::test]
async fn transitions_advance_and_never_regress() {
    let store = MemoryGenerationStore::new();
    let generation = outfit_generation(UserId::new());
    let id = generation.id;
    store.insert(generation).await.unwrap();

    store.mark_generating(&id, "nvidia").await.unwrap();
    let output = ImageId::new();
    store
        .mark_completed(&id, output, "test-model", Utc::now())
        .await
        .unwrap();

    // Terminal is write-once.
    let result = store.mark_failed(&id, "late failure", Utc::now()).await;
    assert!(matches!(
        result.unwrap_err().kind(),
        GarbErrorKind::Data(_)
    ));

    let stored = store.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.state.status(), GenerationStatus::Completed);
    assert_eq!(stored.state.storage_id(), Some(&output));
}

#[tokio::test]
async fn transitions_on_deleted_records_report_not_found() {
    let store = MemoryGenerationStore::new();
    let generation = outfit_generation(UserId::new());
    let id = generation.id;
    store.insert(generation).await.unwrap();
    store.delete(&id).await.unwrap();

    let result = store.mark_generating(&id, "nvidia").await;
    assert!(matches!(
        result.unwrap_err().kind(),
        GarbErrorKind::Data(_)
    ));
}

#[tokio::test]
async fn listing_is_scoped_to_owner_and_newest_first() {
    let store = MemoryGenerationStore::new();
    let alice = UserId::new();
    let bob = UserId::new();

    let mut first = outfit_generation(alice);
    first.created_at = Utc::now() - Duration::minutes(2);
    let mut second = outfit_generation(alice);
    second.created_at = Utc::now() - Duration::minutes(1);
    let other = outfit_generation(bob);

    store.insert(first.clone()).await.unwrap();
    store.insert(second.clone()).await.unwrap();
    store.insert(other).await.unwrap();

    let listed = store.list_for_user(&alice).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);

    let latest = store.latest_for_user(&alice).await.unwrap().unwrap();
    assert_eq!(latest.id, second.id);
}

#[tokio::test]
async fn every_mutation_publishes_an_event() {
    let store = MemoryGenerationStore::new();
    let mut events = store.subscribe();

    let generation = outfit_generation(UserId::new());
    let id = generation.id;
    store.insert(generation).await.unwrap();
    store.mark_generating(&id, "nvidia").await.unwrap();
    store
        .mark_failed(&id, "boom", Utc::now())
        .await
        .unwrap();
    store.delete(&id).await.unwrap();

    let observed: Vec<_> = [
        events.recv().await.unwrap(),
        events.recv().await.unwrap(),
        events.recv().await.unwrap(),
        events.recv().await.unwrap(),
    ]
    .into_iter()
    .map(|event| (event.status, event.deleted))
    .collect();

    assert_eq!(
        observed,
        vec![
            (GenerationStatus::Pending, false),
            (GenerationStatus::Generating, false),
            (GenerationStatus::Failed, false),
            (GenerationStatus::Failed, true),
        ]
    );
}

#[tokio::test]
async fn clothing_items_list_by_category() {
    let store = MemoryClothingItemStore::new();
    let user = UserId::new();

    let top = ClothingItem::new(user, "white tee", ClothingCategory::Tops, ImageId::new());
    let bottom = ClothingItem::new(user, "jeans", ClothingCategory::Bottoms, ImageId::new());
    store.insert(top.clone()).await.unwrap();
    store.insert(bottom.clone()).await.unwrap();

    let tops = store
        .list_for_user(&user, ClothingCategory::Tops)
        .await
        .unwrap();
    assert_eq!(tops.len(), 1);
    assert_eq!(tops[0].id, top.id);

    store.delete(&top.id).await.unwrap();
    assert!(store.get(&top.id).await.unwrap().is_none());
    // Deleting again is a no-op.
    store.delete(&top.id).await.unwrap();
}
