//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html;

use crate::callback_data::CallbackIntent;
use crate::db::{Category, Question};
use crate::localization::{t, t_args};

fn callback_button(text: impl Into<String>, intent: &CallbackIntent) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, intent.to_payload())
}

/// Main menu: categories and feedback side by side
pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        callback_button(t("menu-categories"), &CallbackIntent::ShowCategories),
        callback_button(t("menu-feedback"), &CallbackIntent::Help),
    ]])
}

/// One button per category, labelled with its localized name
pub fn categories_keyboard(categories: &[Category]) -> InlineKeyboardMarkup {
    let rows = categories
        .iter()
        .map(|category| {
            vec![callback_button(
                category.name_localized.clone(),
                &CallbackIntent::Category(category.name.clone()),
            )]
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(rows)
}

/// One button per question, labelled with the question text
pub fn questions_keyboard(questions: &[Question]) -> InlineKeyboardMarkup {
    let rows = questions
        .iter()
        .map(|question| {
            let intent = CallbackIntent::Answer(question.id);
            vec![callback_button(question.text.clone(), &intent)]
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(rows)
}

/// Welcome text for /start, HTML formatted
pub fn format_welcome(display_name: &str) -> String {
    let name = html::escape(display_name);
    format!(
        "{}\n\n{}\n{}\n{}\n{}\n\n{}\n\n{}",
        t_args("welcome-greeting", &[("name", name.as_str())]),
        t("welcome-description"),
        t("welcome-how-it-works"),
        t("welcome-step-categories"),
        t("welcome-step-questions"),
        t("welcome-feedback"),
        t("welcome-flag")
    )
}

/// Question and answer as sent after a question button is pressed
pub fn format_answer(question: &Question) -> String {
    format!(
        "{} \n{}\n\n{} \n{}",
        t("answer-question"),
        question.text,
        t("answer-answer"),
        question.answer
    )
}

/// Notice relayed to the operator
pub fn format_feedback_notice(display_name: &str, text: &str) -> String {
    format!(
        "{}\n\n{}\n{}",
        t_args("feedback-notice-title", &[("name", display_name)]),
        t("feedback-notice-text"),
        text
    )
}

/// Thank-you reply after feedback is relayed
pub fn format_feedback_thanks() -> String {
    format!("{}\n{}\n{}", t("feedback-thanks"), t("feedback-sent"), t("feedback-soon"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn payloads(markup: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
        markup
            .inline_keyboard
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| match &button.kind {
                        InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                        other => panic!("unexpected button kind {other:?}"),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_main_menu_has_two_buttons_in_one_row() {
        let menu = main_menu_keyboard();
        assert_eq!(payloads(&menu), vec![vec!["show_categories".to_string(), "help".to_string()]]);
        assert_eq!(menu.inline_keyboard[0][0].text, "Категорії питань");
        assert_eq!(menu.inline_keyboard[0][1].text, "Зворотній зв'язок");
    }

    #[test]
    fn test_categories_keyboard_uses_stable_names() {
        let categories = vec![
            Category {
                id: 1,
                name: "University".to_string(),
                name_localized: "Університет".to_string(),
            },
            Category {
                id: 2,
                name: "Leisure".to_string(),
                name_localized: "Відпочинок".to_string(),
            },
        ];

        let keyboard = categories_keyboard(&categories);
        assert_eq!(
            payloads(&keyboard),
            vec![vec!["category_University".to_string()], vec!["category_Leisure".to_string()]]
        );
        assert_eq!(keyboard.inline_keyboard[1][0].text, "Відпочинок");
    }

    #[test]
    fn test_questions_keyboard_uses_ids() {
        let questions = vec![Question {
            id: 7,
            text: "Що таке TP?".to_string(),
            answer: "Це практичне заняття.".to_string(),
            category_id: 1,
        }];

        let keyboard = questions_keyboard(&questions);
        assert_eq!(payloads(&keyboard), vec![vec!["answer_7".to_string()]]);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "Що таке TP?");
    }

    #[test]
    fn test_format_answer() {
        let question = Question {
            id: 1,
            text: "Що таке TP?".to_string(),
            answer: "Це практичне заняття.".to_string(),
            category_id: 1,
        };
        assert_eq!(
            format_answer(&question),
            "Питання: \nЩо таке TP?\n\nВідповідь: \nЦе практичне заняття."
        );
    }

    #[test]
    fn test_welcome_escapes_display_name() {
        let welcome = format_welcome("<Olena & Co>");
        assert!(welcome.starts_with("Привіт &lt;Olena &amp; Co&gt;! 😜"));
        assert!(welcome.contains("<b>Категорії питань</b>"));
    }

    #[test]
    fn test_feedback_notice_contains_name_and_text() {
        let notice = format_feedback_notice("Olena Petrenko", "it's broken");
        assert_eq!(
            notice,
            "Проблема від користувача Olena Petrenko\n\nТекст повідомлення:\nit's broken"
        );
    }
}
