//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: commands and plain text messages
//! - `callback_handler`: inline keyboard callback queries
//! - `dialogue_manager`: the conversation state machine
//! - `ui_builder`: keyboards and message texts
//! - `outbound`: delivery of replies, edits and operator notices

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod outbound;
pub mod ui_builder;

use teloxide::dispatching::dialogue::{self, InMemStorage};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use crate::dialogue::ChatState;
use crate::localization::t;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::{command_handler, text_handler};

/// Commands understood by the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    Start,
    Help,
}

/// Command list shown in the Telegram client menu
pub fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", t("command-start")),
        BotCommand::new("help", t("command-help")),
    ]
}

/// Handler tree: every update enters the chat's dialogue, then messages go
/// to the command or text endpoint and callback queries to the callback one.
///
/// Expects `InMemStorage<ChatState>`, `Arc<dyn Catalog>` and `Arc<BotConfig>`
/// among the dispatcher dependencies.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    let commands = teloxide::filter_command::<Command, _>().endpoint(command_handler);

    let messages = Update::filter_message()
        .branch(commands)
        .branch(dptree::endpoint(text_handler));

    let callbacks = Update::filter_callback_query().endpoint(callback_handler);

    dialogue::enter::<Update, InMemStorage<ChatState>, ChatState, _>()
        .branch(messages)
        .branch(callbacks)
}
