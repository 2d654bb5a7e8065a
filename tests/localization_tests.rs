//! # Localization Tests
//!
//! Message lookup and formatting against the embedded Ukrainian resource.

use nef_faq_bot::localization::{t, t_args, LocalizationManager};

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.get_message("menu-title", None);
        assert_eq!(message, "Вибери дію:");
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.get_message("nonexistent-key", None);
        assert_eq!(message, "Missing translation: nonexistent-key");
    }

    #[test]
    fn test_get_message_with_args_has_no_isolation_marks() {
        let manager = setup_localization();

        let message = manager.get_message_with_args("welcome-greeting", &[("name", "Olena")]);
        assert_eq!(message, "Привіт Olena! 😜");
        assert!(!message.contains('\u{2068}'));
        assert!(!message.contains('\u{2069}'));
    }

    #[test]
    fn test_every_used_key_is_translated() {
        let manager = setup_localization();

        let keys = [
            "welcome-description",
            "welcome-how-it-works",
            "welcome-step-categories",
            "welcome-step-questions",
            "welcome-feedback",
            "welcome-flag",
            "menu-title",
            "menu-categories",
            "menu-feedback",
            "command-start",
            "command-help",
            "help-intro-button",
            "help-intro-command",
            "help-prompt",
            "feedback-thanks",
            "feedback-sent",
            "feedback-soon",
            "feedback-notice-text",
            "answer-question",
            "answer-answer",
            "question-not-found",
            "category-empty",
            "catalog-empty",
            "error-generic",
        ];
        for key in keys {
            let message = manager.get_message(key, None);
            assert!(!message.is_empty(), "{key}");
            assert!(!message.starts_with("Missing"), "{key}");
        }
    }

    #[test]
    fn test_invalid_source_is_an_error() {
        assert!(LocalizationManager::from_source("uk", "broken = { $".to_string()).is_err());
        assert!(LocalizationManager::from_source("!!", "a = b".to_string()).is_err());
    }

    #[test]
    fn test_global_helpers() {
        assert_eq!(t("menu-categories"), "Категорії питань");
        assert_eq!(
            t_args("feedback-notice-title", &[("name", "Olena")]),
            "Проблема від користувача Olena"
        );
    }
}
