//! Integration tests for [`relay_bot::Relay`]: per-conversation ordering through the full chain.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use relay_bot::{Handler, HandlerResponse, MiddlewareChain, Relay, Result, TimingMiddleware, Update};

use common::private_text;
use tokio_test::assert_ok;

/// Sleeps for the number of milliseconds in the text, recording start and end.
struct SlowEndpoint {
    events: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Handler for SlowEndpoint {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let text = update.text.clone().unwrap_or_default();
        let tag = format!("{}:{}", update.chat.id, update.message_id);
        self.events.lock().unwrap().push(format!("start {}", tag));
        let ms: u64 = text.parse().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(ms)).await;
        self.events.lock().unwrap().push(format!("end {}", tag));
        Ok(HandlerResponse::Reply(text))
    }
}

fn relay(events: &Arc<Mutex<Vec<String>>>) -> Relay {
    Relay::new(
        MiddlewareChain::new(Arc::new(SlowEndpoint {
            events: events.clone(),
        }))
        .add_middleware(Arc::new(TimingMiddleware)),
    )
}

/// **Test: Same conversation completes in arrival order; the first finishes before the second starts.**
#[tokio::test(start_paused = true)]
async fn test_same_chat_is_sequential() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let relay = relay(&events);

    let first = relay.submit(private_text(1, 1, "50"));
    let second = relay.submit(private_text(1, 2, "0"));
    let (a, b) = tokio::join!(first, second);

    assert_eq!(a.unwrap(), HandlerResponse::Reply("50".into()));
    assert_eq!(b.unwrap(), HandlerResponse::Reply("0".into()));
    assert_eq!(
        *events.lock().unwrap(),
        vec!["start 1:1", "end 1:1", "start 1:2", "end 1:2"]
    );
}

/// **Test: Different conversations overlap; a slow chat does not hold up another.**
#[tokio::test(start_paused = true)]
async fn test_different_chats_interleave() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let relay = relay(&events);

    let slow = relay.submit(private_text(1, 1, "50"));
    let fast = relay.submit(private_text(2, 1, "0"));
    let (a, b) = tokio::join!(slow, fast);
    assert_ok!(a);
    assert_ok!(b);

    let events = events.lock().unwrap().clone();
    let end_fast = events.iter().position(|e| e == "end 2:1").unwrap();
    let end_slow = events.iter().position(|e| e == "end 1:1").unwrap();
    assert!(end_fast < end_slow, "fast chat waited on slow chat: {:?}", events);
}

/// **Test: Lanes are released once a burst for many chats is done.**
#[tokio::test]
async fn test_lanes_released_after_processing() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let relay = relay(&events);

    for chat_id in 0..20 {
        relay.process(private_text(chat_id, 1, "0")).await;
    }
    for _ in 0..1000 {
        if relay.dispatcher().active_lanes() == 0 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(relay.dispatcher().active_lanes(), 0);
    assert_eq!(events.lock().unwrap().len(), 40);
}
