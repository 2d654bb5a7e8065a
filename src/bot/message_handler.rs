//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::User;
use tracing::{debug, info};

use crate::config::BotConfig;
use crate::dialogue::FaqDialogue;

use super::dialogue_manager::{handle_command, handle_text, Transition};
use super::outbound::{deliver, Destination};
use super::Command;

/// Name shown to the operator and used in the greeting
pub fn display_name(user: Option<&User>) -> String {
    user.map(|user| user.full_name()).unwrap_or_default()
}

/// Store the next state, then perform the effects
pub(crate) async fn apply_transition(
    bot: &Bot,
    dialogue: &FaqDialogue,
    destination: Destination,
    transition: Transition,
) -> Result<()> {
    dialogue.update(transition.next).await?;
    deliver(bot, destination, transition.effects).await
}

/// Handle /start and /help
pub async fn command_handler(
    bot: Bot,
    msg: Message,
    command: Command,
    dialogue: FaqDialogue,
    config: Arc<BotConfig>,
) -> Result<()> {
    info!(user_id = %msg.chat.id, command = ?command, "Received command");

    let state = dialogue.get_or_default().await?;
    let transition = handle_command(state, &display_name(msg.from.as_ref()), command);

    let destination = Destination {
        chat_id: msg.chat.id,
        origin: None,
        operator_id: config.operator_id,
    };
    apply_transition(&bot, &dialogue, destination, transition).await
}

/// Handle any other message; only text matters, and only while feedback is awaited
pub async fn text_handler(
    bot: Bot,
    msg: Message,
    dialogue: FaqDialogue,
    config: Arc<BotConfig>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        debug!(user_id = %msg.chat.id, "Ignoring non-text message");
        return Ok(());
    };

    if text.starts_with('/') {
        debug!(user_id = %msg.chat.id, "Ignoring unknown command");
        return Ok(());
    }

    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");

    let state = dialogue.get_or_default().await?;
    if state.is_awaiting_feedback() {
        info!(user_id = %msg.chat.id, "Relaying feedback to operator");
    }
    let transition = handle_text(state, &display_name(msg.from.as_ref()), text);

    let destination = Destination {
        chat_id: msg.chat.id,
        origin: None,
        operator_id: config.operator_id,
    };
    apply_transition(&bot, &dialogue, destination, transition).await
}
