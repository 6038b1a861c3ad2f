//! End-to-end tests of the generation orchestrator.

use async_trait::async_trait;
use garb::{Executor, Generations, Identity, JobQueue};
use garb_core::{
    ClothingCategory, ClothingItem, Generation, GenerationId, GenerationMode, GenerationStatus,
    ImageData, UserId, build_nano_prompt, build_outfit_prompt, LABEL_BOTTOM_ITEM, LABEL_PERSON,
};
use garb_data::{
    ClothingItemStore, GenerationStore, MemoryClothingItemStore, MemoryGenerationStore,
};
use garb_error::GarbErrorKind;
use garb_provider::{GenerationInput, GenerationOutput, ImageProvider};
use garb_quota::{MemoryUsageStore, QuotaGate};
use garb_storage::{ImageStore, MemoryStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Provider double that records every input and replays a fixed output.
struct StubProvider {
    output: GenerationOutput,
    inputs: Mutex<Vec<GenerationInput>>,
}

impl StubProvider {
    fn succeeding() -> Self {
        Self::with_output(GenerationOutput::Success {
            image: ImageData::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png"),
            model: "stub-model".to_string(),
        })
    }

    fn failing(error: &str) -> Self {
        Self::with_output(GenerationOutput::Failure {
            error: error.to_string(),
        })
    }

    fn with_output(output: GenerationOutput) -> Self {
        Self {
            output,
            inputs: Mutex::new(Vec::new()),
        }
    }

    async fn inputs(&self) -> Vec<GenerationInput> {
        self.inputs.lock().await.clone()
    }
}

#[async_trait]
impl ImageProvider for StubProvider {
    fn id(&self) -> &'static str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn generate(&self, input: &GenerationInput) -> GenerationOutput {
        self.inputs.lock().await.push(input.clone());
        self.output.clone()
    }
}

struct Harness {
    user: UserId,
    identity: Identity,
    images: Arc<MemoryStore>,
    generation_store: Arc<MemoryGenerationStore>,
    clothing_store: Arc<MemoryClothingItemStore>,
    provider: Arc<StubProvider>,
    executor: Arc<Executor>,
}

impl Harness {
    fn new(provider: StubProvider) -> Self {
        let user = UserId::new();
        let images = Arc::new(MemoryStore::new());
        let generation_store = Arc::new(MemoryGenerationStore::new());
        let clothing_store = Arc::new(MemoryClothingItemStore::new());
        let provider = Arc::new(provider);

        let executor = Arc::new(Executor::new(
            generation_store.clone(),
            clothing_store.clone(),
            images.clone(),
            provider.clone(),
            None,
        ));

        Self {
            user,
            identity: Identity::authenticated(user),
            images,
            generation_store,
            clothing_store,
            provider,
            executor,
        }
    }

    fn service(&self, limit: u32) -> Generations {
        let quota = QuotaGate::with_limit(Arc::new(MemoryUsageStore::new()), limit);
        let queue = JobQueue::spawn(self.executor.clone(), 2);
        Generations::new(self.generation_store.clone(), self.images.clone(), quota, queue)
    }

    async fn store_blob(&self, bytes: &[u8]) -> garb_core::ImageId {
        self.images.store(bytes, "image/png").await.unwrap()
    }

    /// Store a body blob and rebuild the executor with it as the default.
    async fn set_default_body(&mut self, bytes: &[u8]) -> garb_core::ImageId {
        let body_blob = self.store_blob(bytes).await;
        self.executor = Arc::new(Executor::new(
            self.generation_store.clone(),
            self.clothing_store.clone(),
            self.images.clone(),
            self.provider.clone(),
            Some(body_blob),
        ));
        body_blob
    }
}

async fn wait_for_terminal(
    service: &Generations,
    identity: &Identity,
    id: garb_core::GenerationId,
) -> garb::GenerationView {
    let mut events = service.subscribe();
    for _ in 0..100 {
        let view = service.get(identity, &id).await.unwrap().unwrap();
        if view.generation.state.is_terminal() {
            return view;
        }
        let _ = tokio::time::timeout(Duration::from_secs(1), events.recv()).await;
    }
    panic!("generation {id} never reached a terminal state");
}

#[tokio::test]
async fn bottom_only_outfit_sends_bottom_then_person() {
    let harness = Harness::new(StubProvider::succeeding());

    let bottom_blob = harness.store_blob(b"bottom bytes").await;
    let body_blob = harness.store_blob(b"body bytes").await;
    let bottom = ClothingItem::new(
        harness.user,
        "Linen trousers",
        ClothingCategory::Bottoms,
        bottom_blob,
    );
    harness.clothing_store.insert(bottom.clone()).await.unwrap();

    let generation = Generation::new(harness.user, GenerationMode::Outfit, build_outfit_prompt())
        .with_items(None, Some(bottom.id))
        .with_model_image(Some(body_blob));
    let id = generation.id;
    harness.generation_store.insert(generation).await.unwrap();

    harness.executor.execute(&id).await;

    let inputs = harness.provider.inputs().await;
    assert_eq!(inputs.len(), 1);
    let labels: Vec<&str> = inputs[0]
        .labeled_images
        .iter()
        .map(|labeled| labeled.label.as_str())
        .collect();
    assert_eq!(labels, vec![LABEL_BOTTOM_ITEM, LABEL_PERSON]);

    let stored = harness.generation_store.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.state.status(), GenerationStatus::Completed);
}

#[tokio::test]
async fn missing_clothing_references_are_skipped_silently() {
    let harness = Harness::new(StubProvider::succeeding());
    let body_blob = harness.store_blob(b"body bytes").await;

    // Top id points at a record that was deleted; bottom was never set.
    let generation = Generation::new(harness.user, GenerationMode::Outfit, build_outfit_prompt())
        .with_items(Some(garb_core::ClothingItemId::new()), None)
        .with_model_image(Some(body_blob));
    let id = generation.id;
    harness.generation_store.insert(generation).await.unwrap();

    harness.executor.execute(&id).await;

    let inputs = harness.provider.inputs().await;
    let labels: Vec<&str> = inputs[0]
        .labeled_images
        .iter()
        .map(|labeled| labeled.label.as_str())
        .collect();
    assert_eq!(labels, vec![LABEL_PERSON]);
}

#[tokio::test]
async fn no_body_image_fails_without_storing_anything() {
    let harness = Harness::new(StubProvider::succeeding());

    let generation = Generation::new(
        harness.user,
        GenerationMode::Nano,
        build_nano_prompt("a gallery opening"),
    );
    let id = generation.id;
    harness.generation_store.insert(generation).await.unwrap();

    harness.executor.execute(&id).await;

    let stored = harness.generation_store.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.state.status(), GenerationStatus::Failed);
    let message = stored.state.error_message().unwrap();
    assert!(message.contains("model image"), "unexpected message: {message}");

    // The provider was never called and no output blob was written.
    assert!(harness.provider.inputs().await.is_empty());
    assert!(harness.images.is_empty().await);
}

#[tokio::test]
async fn provider_failure_message_is_recorded_verbatim() {
    let error = "No image data found in response from NVIDIA API";
    let harness = Harness::new(StubProvider::failing(error));
    let body_blob = harness.store_blob(b"body bytes").await;

    let generation = Generation::new(
        harness.user,
        GenerationMode::Nano,
        build_nano_prompt("brunch"),
    )
    .with_model_image(Some(body_blob));
    let id = generation.id;
    harness.generation_store.insert(generation).await.unwrap();

    harness.executor.execute(&id).await;

    let stored = harness.generation_store.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.state.status(), GenerationStatus::Failed);
    assert_eq!(stored.state.error_message(), Some(error));
}

#[tokio::test]
async fn deleted_generation_is_abandoned_without_transitions() {
    let harness = Harness::new(StubProvider::succeeding());

    let generation = Generation::new(
        harness.user,
        GenerationMode::Nano,
        build_nano_prompt("a hike"),
    );
    let id = generation.id;
    harness.generation_store.insert(generation).await.unwrap();
    harness.generation_store.delete(&id).await.unwrap();

    harness.executor.execute(&id).await;

    assert!(harness.provider.inputs().await.is_empty());
    assert!(harness.generation_store.get(&id).await.unwrap().is_none());
}

/// Provider double that deletes its own generation record before returning
/// a success, forcing the completed transition to miss.
struct SelfDeletingProvider {
    store: Arc<MemoryGenerationStore>,
    id: GenerationId,
}

#[async_trait]
impl ImageProvider for SelfDeletingProvider {
    fn id(&self) -> &'static str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn generate(&self, _input: &GenerationInput) -> GenerationOutput {
        self.store.delete(&self.id).await.unwrap();
        GenerationOutput::Success {
            image: ImageData::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png"),
            model: "stub-model".to_string(),
        }
    }
}

#[tokio::test]
async fn output_blob_is_released_when_the_record_vanishes_mid_flight() {
    let user = UserId::new();
    let images = Arc::new(MemoryStore::new());
    let generation_store = Arc::new(MemoryGenerationStore::new());
    let clothing_store = Arc::new(MemoryClothingItemStore::new());

    let body_blob = images.store(b"body bytes", "image/png").await.unwrap();
    let generation = Generation::new(user, GenerationMode::Nano, build_nano_prompt("a gala"))
        .with_model_image(Some(body_blob));
    let id = generation.id;
    generation_store.insert(generation).await.unwrap();

    let provider = Arc::new(SelfDeletingProvider {
        store: generation_store.clone(),
        id,
    });
    let executor = Executor::new(
        generation_store.clone(),
        clothing_store,
        images.clone(),
        provider,
        None,
    );

    executor.execute(&id).await;

    assert!(generation_store.get(&id).await.unwrap().is_none());
    // Only the body reference survives; the orphaned output was deleted.
    assert!(images.get(&body_blob).await.unwrap().is_some());
    assert_eq!(images.len().await, 1);
}

#[tokio::test]
async fn happy_path_runs_pending_generating_completed() {
    let mut harness = Harness::new(StubProvider::succeeding());
    harness.set_default_body(b"body bytes").await;
    let service = harness.service(10);

    let mut events = service.subscribe();
    let id = service
        .start_nano(&harness.identity, "a summer wedding", None)
        .await
        .unwrap();

    let view = wait_for_terminal(&service, &harness.identity, id).await;
    assert_eq!(view.generation.state.status(), GenerationStatus::Completed);
    assert!(view.image_url.is_some());

    let mut statuses = Vec::new();
    while let Ok(event) =
        tokio::time::timeout(Duration::from_millis(200), events.recv()).await
    {
        if let Ok(event) = event {
            if event.id == id {
                statuses.push(event.status);
            }
        } else {
            break;
        }
    }
    assert_eq!(
        statuses,
        vec![
            GenerationStatus::Pending,
            GenerationStatus::Generating,
            GenerationStatus::Completed,
        ]
    );

    // Exactly one provider call per generation.
    assert_eq!(harness.provider.inputs().await.len(), 1);
}

#[tokio::test]
async fn exhausted_quota_rejects_admission_without_a_record() {
    let harness = Harness::new(StubProvider::failing("quota test"));
    let service = harness.service(1);

    let first = service
        .start_nano(&harness.identity, "first", None)
        .await
        .unwrap();
    let _ = wait_for_terminal(&service, &harness.identity, first).await;

    let refused = service
        .start_nano(&harness.identity, "second", None)
        .await
        .unwrap_err();
    match refused.kind() {
        GarbErrorKind::Quota(quota) => {
            assert!(quota.to_string().contains("Daily limit reached"));
        }
        other => panic!("expected a quota error, got {other}"),
    }

    // Exactly one record exists and the failed first attempt kept its slot.
    let records = harness
        .generation_store
        .list_for_user(&harness.user)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);

    let status = service.quota(&harness.identity).await.unwrap();
    assert_eq!(status.used, 1);
    assert!(!status.allowed);
}

#[tokio::test]
async fn reads_are_owner_scoped() {
    let harness = Harness::new(StubProvider::failing("unused"));

    let generation = Generation::new(
        harness.user,
        GenerationMode::Nano,
        build_nano_prompt("a picnic"),
    );
    let id = generation.id;
    harness.generation_store.insert(generation).await.unwrap();

    let service = harness.service(10);
    let stranger = Identity::authenticated(UserId::new());

    assert!(service.get(&stranger, &id).await.unwrap().is_none());
    assert!(service.get(&harness.identity, &id).await.unwrap().is_some());
    assert!(service.remove(&stranger, &id).await.is_err());
}
