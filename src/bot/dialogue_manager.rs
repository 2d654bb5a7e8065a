//! Dialogue Manager module: the conversation state machine
//!
//! Every inbound event is reduced to a [`Transition`]: the state the chat
//! moves to and the effects to deliver. Nothing here talks to Telegram, so
//! the whole flow can be driven from tests with any [`Catalog`].

use tracing::{debug, error, info};

use crate::bot::outbound::Outbound;
use crate::bot::ui_builder::{
    categories_keyboard, format_answer, format_feedback_notice, format_feedback_thanks,
    format_welcome, main_menu_keyboard, questions_keyboard,
};
use crate::bot::Command;
use crate::callback_data::CallbackIntent;
use crate::db::Catalog;
use crate::dialogue::ChatState;
use crate::localization::t;

/// Result of handling one event
#[derive(Debug, Clone)]
pub struct Transition {
    pub next: ChatState,
    pub effects: Vec<Outbound>,
}

impl Transition {
    fn stay(state: ChatState, effects: Vec<Outbound>) -> Self {
        Self { next: state, effects }
    }
}

fn main_menu() -> Outbound {
    Outbound::with_keyboard(t("menu-title"), main_menu_keyboard())
}

fn generic_error() -> Outbound {
    Outbound::text(t("error-generic"))
}

/// Handle /start and /help
pub fn handle_command(state: ChatState, display_name: &str, command: Command) -> Transition {
    match command {
        Command::Start => Transition::stay(
            state,
            vec![
                Outbound::Reply {
                    text: format_welcome(display_name),
                    keyboard: None,
                    html: true,
                },
                main_menu(),
            ],
        ),
        Command::Help => Transition {
            next: ChatState::AwaitingFeedback,
            effects: vec![
                Outbound::text(t("help-intro-command")),
                Outbound::text(t("help-prompt")),
            ],
        },
    }
}

/// Handle a pressed inline button
pub async fn handle_callback(
    catalog: &dyn Catalog,
    state: ChatState,
    intent: CallbackIntent,
) -> Transition {
    match intent {
        CallbackIntent::ShowCategories => match catalog.list_categories().await {
            Ok(categories) if categories.is_empty() => {
                info!("Catalog has no categories");
                Transition::stay(state, vec![Outbound::text(t("catalog-empty")), main_menu()])
            }
            Ok(categories) => {
                debug!(count = categories.len(), "Rendering categories");
                let keyboard = categories_keyboard(&categories);
                Transition::stay(state, vec![Outbound::EditKeyboard(keyboard)])
            }
            Err(e) => {
                error!(error = %e, "Could not render categories");
                Transition::stay(state, vec![generic_error()])
            }
        },
        CallbackIntent::Category(name) => match catalog.list_questions(&name).await {
            Ok(questions) if questions.is_empty() => {
                info!(category = %name, "Category has no questions");
                Transition::stay(state, vec![Outbound::text(t("category-empty")), main_menu()])
            }
            Ok(questions) => {
                debug!(category = %name, count = questions.len(), "Rendering questions");
                let keyboard = questions_keyboard(&questions);
                Transition::stay(state, vec![Outbound::EditKeyboard(keyboard)])
            }
            Err(e) => {
                error!(category = %name, error = %e, "Could not render questions");
                Transition::stay(state, vec![generic_error()])
            }
        },
        CallbackIntent::Answer(id) => match catalog.get_question(id).await {
            Ok(question) => {
                let answer = Outbound::text(format_answer(&question));
                Transition::stay(state, vec![answer, main_menu()])
            }
            Err(e) if e.is_not_found() => {
                info!(question_id = id, "Answer requested for missing question");
                Transition::stay(state, vec![Outbound::text(t("question-not-found")), main_menu()])
            }
            Err(e) => {
                error!(question_id = id, error = %e, "Could not load answer");
                Transition::stay(state, vec![generic_error()])
            }
        },
        CallbackIntent::Help => Transition {
            next: ChatState::AwaitingFeedback,
            effects: vec![
                Outbound::EditText(t("help-intro-button")),
                Outbound::text(t("help-prompt")),
            ],
        },
    }
}

/// Handle a plain text message
pub fn handle_text(state: ChatState, display_name: &str, text: &str) -> Transition {
    match state {
        ChatState::AwaitingFeedback => Transition {
            next: ChatState::Browsing,
            effects: vec![
                Outbound::NotifyOperator(format_feedback_notice(display_name, text)),
                Outbound::text(format_feedback_thanks()),
                main_menu(),
            ],
        },
        ChatState::Browsing => {
            debug!("Ignoring text outside the feedback flow");
            Transition::stay(state, Vec::new())
        }
    }
}
