//! Outbound effects and their delivery to Telegram
//!
//! The conversation engine describes what should be sent as a list of
//! [`Outbound`] values; [`deliver`] performs them in order.

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MessageId, ParseMode};
use tracing::{debug, error, warn};

/// One message or edit the bot should perform
#[derive(Debug, Clone)]
pub enum Outbound {
    /// New message in the user's chat
    Reply {
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
        html: bool,
    },
    /// Replace the buttons of the message whose button was pressed
    EditKeyboard(InlineKeyboardMarkup),
    /// Replace the text of the message whose button was pressed
    EditText(String),
    /// Direct message to the operator
    NotifyOperator(String),
}

impl Outbound {
    pub fn text(text: impl Into<String>) -> Self {
        Outbound::Reply {
            text: text.into(),
            keyboard: None,
            html: false,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Outbound::Reply {
            text: text.into(),
            keyboard: Some(keyboard),
            html: false,
        }
    }
}

/// Where effects are delivered
#[derive(Debug, Clone, Copy)]
pub struct Destination {
    pub chat_id: ChatId,
    /// Message carrying the pressed button, if the update was a callback
    pub origin: Option<MessageId>,
    pub operator_id: ChatId,
}

/// Perform effects in order.
///
/// Failures to reach the operator are logged and skipped so the user still
/// gets the replies that follow; any other send failure is returned.
pub async fn deliver(bot: &Bot, destination: Destination, effects: Vec<Outbound>) -> Result<()> {
    for effect in effects {
        match effect {
            Outbound::Reply { text, keyboard, html } => {
                let mut request = bot.send_message(destination.chat_id, text);
                if let Some(keyboard) = keyboard {
                    request = request.reply_markup(keyboard);
                }
                if html {
                    request = request.parse_mode(ParseMode::Html);
                }
                request.await?;
            }
            Outbound::EditKeyboard(keyboard) => match destination.origin {
                Some(message_id) => {
                    bot.edit_message_reply_markup(destination.chat_id, message_id)
                        .reply_markup(keyboard)
                        .await?;
                }
                None => warn!(user_id = %destination.chat_id, "No message to edit buttons of"),
            },
            Outbound::EditText(text) => match destination.origin {
                Some(message_id) => {
                    bot.edit_message_text(destination.chat_id, message_id, text).await?;
                }
                None => warn!(user_id = %destination.chat_id, "No message to edit text of"),
            },
            Outbound::NotifyOperator(text) => {
                match bot.send_message(destination.operator_id, text).await {
                    Ok(_) => debug!(user_id = %destination.chat_id, "Feedback relayed to operator"),
                    Err(e) => error!(
                        user_id = %destination.chat_id,
                        operator_id = %destination.operator_id,
                        error = %e,
                        "Failed to relay feedback to operator"
                    ),
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButton;

    /// Bot whose API endpoint refuses every connection
    fn offline_bot() -> Bot {
        Bot::new("test-token").set_api_url("http://127.0.0.1:1".parse().unwrap())
    }

    fn destination(origin: Option<MessageId>) -> Destination {
        Destination {
            chat_id: ChatId(1),
            origin,
            operator_id: ChatId(2),
        }
    }

    #[tokio::test]
    async fn test_operator_failure_is_not_fatal() {
        let effects = vec![Outbound::NotifyOperator("feedback".to_string())];
        assert!(deliver(&offline_bot(), destination(None), effects).await.is_ok());
    }

    #[tokio::test]
    async fn test_reply_failure_is_returned() {
        let effects = vec![Outbound::text("hello")];
        assert!(deliver(&offline_bot(), destination(None), effects).await.is_err());
    }

    #[tokio::test]
    async fn test_reply_after_operator_failure_is_still_attempted() {
        let effects = vec![
            Outbound::NotifyOperator("feedback".to_string()),
            Outbound::text("thanks"),
        ];
        assert!(deliver(&offline_bot(), destination(None), effects).await.is_err());
    }

    #[tokio::test]
    async fn test_edits_without_origin_are_skipped() {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "x",
            "show_categories",
        )]]);
        let effects = vec![
            Outbound::EditKeyboard(keyboard),
            Outbound::EditText("edited".to_string()),
        ];
        assert!(deliver(&offline_bot(), destination(None), effects).await.is_ok());
    }
}
