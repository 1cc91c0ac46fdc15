//! Integration tests for [`relay_bot::TelegramBotAdapter`] against a mocked Bot API server.

use mockito::Matcher;
use relay_bot::{
    build_teloxide_bot, Bot, ErrorKind, MessageRef, SendOptions, TelegramBotAdapter,
};

const TEST_BOT_TOKEN: &str = "123456:TEST";

fn adapter(server: &mockito::Server) -> TelegramBotAdapter {
    let bot = build_teloxide_bot(TEST_BOT_TOKEN, Some(&server.url())).unwrap();
    TelegramBotAdapter::new(bot)
}

/// **Test: sendMessage result is returned as a message handle.**
#[tokio::test]
async fn test_send_message_returns_sent_handle() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"(?i)/sendmessage$".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "ok": true,
            "result": {
                "message_id": 321,
                "date": 1706529600,
                "chat": {"id": 123, "type": "private", "first_name": "Ada"},
                "from": {"id": 123456, "is_bot": true, "first_name": "TestBot", "username": "testbot"},
                "text": "<b>Processing</b>"
            }
        }"#,
        )
        .create_async()
        .await;

    let sent = adapter(&server)
        .send_message(123, "<b>Processing</b>", SendOptions::html().replying_to(5))
        .await
        .unwrap();

    assert_eq!(
        sent,
        MessageRef {
            chat_id: 123,
            message_id: 321
        }
    );
    mock.assert_async().await;
}

/// **Test: A blocked recipient is classified as unreachable, not as a platform failure.**
#[tokio::test]
async fn test_blocked_user_maps_to_recipient_unreachable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", Matcher::Regex(r"(?i)/sendmessage$".to_string()))
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"ok": false, "error_code": 403, "description": "Forbidden: bot was blocked by the user"}"#,
        )
        .create_async()
        .await;

    let err = adapter(&server)
        .send_message(123, "hi", SendOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RecipientUnreachable);
}

/// **Test: Other API errors are platform call failures naming the method.**
#[tokio::test]
async fn test_delete_failure_maps_to_platform_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", Matcher::Regex(r"(?i)/deletemessage$".to_string()))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: message to delete not found"}"#,
        )
        .create_async()
        .await;

    let err = adapter(&server)
        .delete_message(MessageRef {
            chat_id: 123,
            message_id: 1,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PlatformCallFailure);
    assert!(err.to_string().contains("deleteMessage"));
}
