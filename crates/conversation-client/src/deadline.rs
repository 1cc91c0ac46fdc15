//! Hard deadline around any [`ConversationClient`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{instrument, warn};

use crate::{ConversationClient, ConversationError, ConversationRequest, ConversationResponse, Result};

/// Races the inner client against a fixed deadline. On expiry the inner call is dropped, which aborts
/// any in-flight HTTP request, and the caller gets [`ConversationError::Timeout`].
#[derive(Clone)]
pub struct DeadlineClient {
    inner: Arc<dyn ConversationClient>,
    deadline: Duration,
}

impl DeadlineClient {
    pub fn new(inner: Arc<dyn ConversationClient>, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[async_trait]
impl ConversationClient for DeadlineClient {
    #[instrument(skip(self, request), fields(deadline_secs = self.deadline.as_secs()))]
    async fn send(&self, request: ConversationRequest) -> Result<ConversationResponse> {
        match tokio::time::timeout(self.deadline, self.inner.send(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(deadline_secs = self.deadline.as_secs(), "Backend call exceeded deadline, cancelled");
                Err(ConversationError::Timeout(self.deadline))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Never answers; flags when its in-flight call is dropped.
    struct Hanging {
        dropped: Arc<AtomicBool>,
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ConversationClient for Hanging {
        async fn send(&self, _request: ConversationRequest) -> Result<ConversationResponse> {
            let _flag = DropFlag(self.dropped.clone());
            std::future::pending::<()>().await;
            unreachable!()
        }
    }

    struct Slow(Duration);

    #[async_trait]
    impl ConversationClient for Slow {
        async fn send(&self, request: ConversationRequest) -> Result<ConversationResponse> {
            tokio::time::sleep(self.0).await;
            Ok(ConversationResponse {
                text: format!("echo {}", request.text),
                conversation_id: "c".into(),
                message_id: "m".into(),
                usage: None,
            })
        }
    }

    /// **Test: A call that never answers times out at the deadline and is cancelled.**
    #[tokio::test(start_paused = true)]
    async fn test_deadline_expiry_yields_timeout_and_cancels() {
        let dropped = Arc::new(AtomicBool::new(false));
        let client = DeadlineClient::new(
            Arc::new(Hanging {
                dropped: dropped.clone(),
            }),
            Duration::from_secs(60),
        );

        let started = tokio::time::Instant::now();
        let result = client.send(ConversationRequest::new("hello")).await;

        assert_eq!(result, Err(ConversationError::Timeout(Duration::from_secs(60))));
        assert!(started.elapsed() >= Duration::from_secs(60));
        assert!(started.elapsed() < Duration::from_secs(61));
        assert!(dropped.load(Ordering::SeqCst), "in-flight backend call was not dropped");
    }

    /// **Test: A call that answers before the deadline passes through unchanged.**
    #[tokio::test(start_paused = true)]
    async fn test_answer_before_deadline_passes_through() {
        let client = DeadlineClient::new(Arc::new(Slow(Duration::from_secs(59))), Duration::from_secs(60));

        let response = client.send(ConversationRequest::new("hi")).await.unwrap();

        assert_eq!(response.text, "echo hi");
    }

    /// **Test: Backend errors are not turned into timeouts.**
    #[tokio::test(start_paused = true)]
    async fn test_backend_error_is_distinct_from_timeout() {
        struct Failing;

        #[async_trait]
        impl ConversationClient for Failing {
            async fn send(&self, _request: ConversationRequest) -> Result<ConversationResponse> {
                Err(ConversationError::Backend("rate limited".into()))
            }
        }

        let client = DeadlineClient::new(Arc::new(Failing), Duration::from_secs(60));
        let result = client.send(ConversationRequest::new("hi")).await;

        assert_eq!(result, Err(ConversationError::Backend("rate limited".into())));
    }
}
