//! # Sequential dispatcher
//!
//! Per-conversation FIFO mutual exclusion. Each [`ConversationKey`] gets its own lane (an unbounded queue
//! drained by one worker task), created on first use. Tasks for one key run one at a time in admission
//! order; tasks for different keys never wait on each other. A lane is evicted as soon as it has no
//! queued or running work, so the map only holds conversations that are currently busy.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use crate::core::{RelayError, Result};
use crate::session::ConversationKey;

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

struct Lane {
    tx: mpsc::UnboundedSender<Job>,
    /// Queued plus running jobs. Incremented under the map entry guard, so eviction cannot race admission.
    pending: Arc<AtomicUsize>,
}

/// Runs admitted tasks one at a time per key, in admission order.
#[derive(Clone, Default)]
pub struct SequentialDispatcher {
    lanes: Arc<DashMap<ConversationKey, Lane>>,
}

impl SequentialDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` behind every task already admitted for `key`.
    ///
    /// Admission happens synchronously, so call order fixes execution order. The returned future
    /// resolves with the task's output once it has run; it does not need to be polled for the task to
    /// make progress. A panicking task yields `Err` and does not stall the lane.
    pub fn admit<F, T>(&self, key: ConversationKey, task: F) -> impl Future<Output = Result<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let out = task.await;
            let _ = done_tx.send(out);
        });
        self.enqueue(key.clone(), job);

        async move {
            done_rx
                .await
                .map_err(|_| RelayError::Unknown(format!("task for conversation {} panicked", key)))
        }
    }

    /// Number of conversations with queued or running work.
    pub fn active_lanes(&self) -> usize {
        self.lanes.len()
    }

    fn enqueue(&self, key: ConversationKey, job: Job) {
        let mut lane = self
            .lanes
            .entry(key.clone())
            .or_insert_with(|| self.spawn_lane(key.clone()));
        lane.pending.fetch_add(1, Ordering::SeqCst);
        if let Err(mpsc::error::SendError(job)) = lane.tx.send(job) {
            // Worker is gone; start a fresh lane under the same guard.
            error!(key = %key, "dispatcher lane closed, restarting");
            let fresh = self.spawn_lane(key.clone());
            fresh.pending.fetch_add(1, Ordering::SeqCst);
            let _ = fresh.tx.send(job);
            *lane = fresh;
        }
        debug!(key = %key, pending = lane.pending.load(Ordering::SeqCst), "step: task admitted");
    }

    fn spawn_lane(&self, key: ConversationKey) -> Lane {
        let (tx, rx) = mpsc::unbounded_channel::<Job>();
        let pending = Arc::new(AtomicUsize::new(0));
        tokio::spawn(Self::drain_lane(
            rx,
            key,
            pending.clone(),
            Arc::clone(&self.lanes),
        ));
        Lane { tx, pending }
    }

    /// Worker loop for one key. Exits when its lane is evicted and the sender is dropped.
    async fn drain_lane(
        mut rx: mpsc::UnboundedReceiver<Job>,
        key: ConversationKey,
        pending: Arc<AtomicUsize>,
        lanes: Arc<DashMap<ConversationKey, Lane>>,
    ) {
        debug!(key = %key, "step: lane started");
        while let Some(job) = rx.recv().await {
            if AssertUnwindSafe(job).catch_unwind().await.is_err() {
                error!(key = %key, "task panicked; continuing with next queued task");
            }
            if pending.fetch_sub(1, Ordering::SeqCst) == 1 {
                lanes.remove_if(&key, |_, lane| {
                    Arc::ptr_eq(&lane.pending, &pending) && lane.pending.load(Ordering::SeqCst) == 0
                });
            }
        }
        debug!(key = %key, "step: lane evicted");
    }
}
