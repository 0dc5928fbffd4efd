use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatId, Recipient},
};

use crate::error::DeliveryError;

/// Outbound channel for status notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), DeliveryError>;
}

/// Sends plain-text messages to a single configured Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat_id: &str) -> Self {
        Self {
            bot,
            chat: parse_recipient(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), DeliveryError> {
        tracing::info!(target: "telegram", "sending notification");
        self.bot
            .send_message(self.chat.clone(), message)
            .await
            .map_err(DeliveryError::from)?;
        tracing::debug!(target: "telegram", text = message, "notification delivered");
        Ok(())
    }
}

/// Numeric ids address a chat directly; anything else is taken as a channel username.
fn parse_recipient(chat_id: &str) -> Recipient {
    match chat_id.trim().parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => {
            let name = chat_id.trim();
            if name.starts_with('@') {
                Recipient::ChannelUsername(name.to_string())
            } else {
                Recipient::ChannelUsername(format!("@{name}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    const SEND_MESSAGE: &str = r"(?i)^/bottest-token/sendmessage$";

    fn notifier_for(server: &Server, chat_id: &str) -> TelegramNotifier {
        let api_url = server.url().parse().unwrap();
        TelegramNotifier::new(Bot::new("test-token").set_api_url(api_url), chat_id)
    }

    #[tokio::test]
    async fn sends_plain_text_to_configured_chat() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex(SEND_MESSAGE.into()))
            .match_body(Matcher::Json(json!({"chat_id": 123456, "text": "hello"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "ok": true,
                    "result": {
                        "message_id": 1,
                        "date": 1700000000,
                        "chat": {"id": 123456, "type": "private", "first_name": "Student"},
                        "from": {"id": 42, "is_bot": true, "first_name": "bot"},
                        "text": "hello"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let notifier = notifier_for(&server, "123456");
        notifier.notify("hello").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_send_is_a_delivery_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Regex(SEND_MESSAGE.into()))
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was blocked by the user"}"#,
            )
            .create_async()
            .await;

        let notifier = notifier_for(&server, "123456");
        let err = notifier.notify("hello").await.unwrap_err();

        assert!(err
            .to_string()
            .starts_with("failed to deliver message to Telegram"));
    }

    #[test]
    fn numeric_chat_ids_address_chats() {
        assert_eq!(parse_recipient("123456"), Recipient::Id(ChatId(123456)));
        assert_eq!(
            parse_recipient("-1001234567890"),
            Recipient::Id(ChatId(-1001234567890))
        );
    }

    #[test]
    fn other_ids_are_channel_usernames() {
        assert_eq!(
            parse_recipient("@homework_feed"),
            Recipient::ChannelUsername("@homework_feed".into())
        );
        assert_eq!(
            parse_recipient("homework_feed"),
            Recipient::ChannelUsername("@homework_feed".into())
        );
    }
}
