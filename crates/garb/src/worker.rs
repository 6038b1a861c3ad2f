//! Bounded in-process worker pool.
//!
//! Admission hands generation ids to [`JobQueue::enqueue`]; a dispatcher
//! task pulls them off a bounded channel and spawns one execution per job,
//! capped by a semaphore. Jobs are independent: no ordering guarantees, no
//! cancellation once started, and exactly one provider call per generation.

use crate::Executor;
use garb_core::GenerationId;
use garb_error::{DataError, DataErrorKind, GarbResult};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error};

const QUEUE_CAPACITY: usize = 64;

/// Handle for submitting admitted generations to the worker pool.
#[derive(Debug, Clone)]
pub struct JobQueue {
    tx: mpsc::Sender<GenerationId>,
}

impl JobQueue {
    /// Start a dispatcher over the executor and return the queue handle.
    ///
    /// `concurrency` bounds how many executions run at once; queued jobs
    /// wait for a permit. The dispatcher exits when every queue handle is
    /// dropped.
    pub fn spawn(executor: Arc<Executor>, concurrency: usize) -> Self {
        let (tx, mut rx) = mpsc::channel(QUEUE_CAPACITY);
        let permits = Arc::new(Semaphore::new(concurrency.max(1)));

        tokio::spawn(async move {
            while let Some(id) = rx.recv().await {
                let permit = match permits.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        error!(error = %e, "Worker semaphore closed, stopping dispatcher");
                        break;
                    }
                };
                let executor = executor.clone();
                tokio::spawn(async move {
                    executor.execute(&id).await;
                    drop(permit);
                });
            }
            debug!("Generation dispatcher stopped");
        });

        Self { tx }
    }

    /// Enqueue a generation for execution.
    ///
    /// Applies backpressure when the queue is full and errors only if the
    /// dispatcher has shut down.
    pub async fn enqueue(&self, id: GenerationId) -> GarbResult<()> {
        self.tx.send(id).await.map_err(|_| {
            DataError::new(DataErrorKind::Closed(
                "generation job queue is closed".to_string(),
            ))
        })?;
        debug!(%id, "Enqueued generation");
        Ok(())
    }
}
