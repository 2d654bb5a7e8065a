//! Conversation state kept per chat between updates.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Where a chat is in the conversation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatState {
    /// Navigating menus; plain text is ignored
    #[default]
    Browsing,
    /// The feedback prompt was shown; the next plain text goes to the operator
    AwaitingFeedback,
}

impl ChatState {
    pub fn is_awaiting_feedback(&self) -> bool {
        matches!(self, ChatState::AwaitingFeedback)
    }
}

/// Type alias for our FAQ dialogue
pub type FaqDialogue = Dialogue<ChatState, InMemStorage<ChatState>>;
