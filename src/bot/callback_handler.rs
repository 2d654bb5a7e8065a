//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::callback_data::CallbackIntent;
use crate::config::BotConfig;
use crate::db::Catalog;
use crate::dialogue::FaqDialogue;

use super::dialogue_manager::handle_callback;
use super::message_handler::apply_transition;
use super::outbound::Destination;

async fn handle_intent(
    bot: &Bot,
    dialogue: &FaqDialogue,
    catalog: &dyn Catalog,
    destination: Destination,
    intent: CallbackIntent,
) -> Result<()> {
    let state = dialogue.get_or_default().await?;
    let transition = handle_callback(catalog, state, intent).await;
    apply_transition(bot, dialogue, destination, transition).await
}

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: FaqDialogue,
    catalog: Arc<dyn Catalog>,
    config: Arc<BotConfig>,
) -> Result<()> {
    debug!(user_id = %q.from.id, data = ?q.data, "Received callback query from user");

    let intent = q.data.as_deref().and_then(CallbackIntent::parse);

    let result = match (intent, &q.message) {
        (Some(intent), Some(msg)) => {
            let destination = Destination {
                chat_id: msg.chat().id,
                origin: Some(msg.id()),
                operator_id: config.operator_id,
            };
            handle_intent(&bot, &dialogue, catalog.as_ref(), destination, intent).await
        }
        (Some(_), None) => {
            warn!(user_id = %q.from.id, "Callback query without a message, ignoring");
            Ok(())
        }
        (None, _) => {
            warn!(user_id = %q.from.id, data = ?q.data, "Unknown callback payload, ignoring");
            Ok(())
        }
    };

    // Answer the callback query to remove the loading state
    let answered = bot.answer_callback_query(q.id).await.map(|_| ());
    settle_callback(answered, result)
}

/// Combine the outcome of handling a callback with the outcome of answering
/// it. A handling error wins; a failed answer alone is only logged.
fn settle_callback<E: std::fmt::Display>(
    answered: Result<(), E>,
    handled: Result<()>,
) -> Result<()> {
    if let Err(e) = answered {
        warn!(error = %e, "Failed to answer callback query");
    }
    handled
}
