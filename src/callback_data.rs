//! Typed inline keyboard payloads.
//!
//! Buttons carry a short string; it is parsed into a [`CallbackIntent`] once,
//! when the callback query arrives, and handlers match on the enum.

pub const SHOW_CATEGORIES: &str = "show_categories";
pub const HELP: &str = "help";
pub const CATEGORY_PREFIX: &str = "category_";
pub const ANSWER_PREFIX: &str = "answer_";

/// Separator between a payload prefix and its argument
pub const ROUTING_DELIMITER: char = '_';

/// Telegram rejects callback data longer than this many bytes
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// What a pressed button asks the bot to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackIntent {
    ShowCategories,
    /// Category by its stable `name`
    Category(String),
    /// Question by id
    Answer(i32),
    Help,
}

impl CallbackIntent {
    /// Parse a callback payload; unknown payloads yield `None`
    pub fn parse(data: &str) -> Option<Self> {
        if data == SHOW_CATEGORIES {
            return Some(Self::ShowCategories);
        }
        if data == HELP {
            return Some(Self::Help);
        }
        if let Some(name) = data.strip_prefix(CATEGORY_PREFIX) {
            return (!name.is_empty()).then(|| Self::Category(name.to_string()));
        }
        if let Some(raw_id) = data.strip_prefix(ANSWER_PREFIX) {
            return raw_id.parse().ok().map(Self::Answer);
        }
        None
    }

    /// Payload to attach to a button
    pub fn to_payload(&self) -> String {
        match self {
            Self::ShowCategories => SHOW_CATEGORIES.to_string(),
            Self::Help => HELP.to_string(),
            Self::Category(name) => format!("{CATEGORY_PREFIX}{name}"),
            Self::Answer(id) => format!("{ANSWER_PREFIX}{id}"),
        }
    }
}

/// Check that a category name can travel inside a `category_` payload
pub fn validate_category_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty");
    }
    if name.contains(ROUTING_DELIMITER) {
        return Err("contains the routing delimiter");
    }
    if CATEGORY_PREFIX.len() + name.len() > MAX_CALLBACK_DATA_BYTES {
        return Err("too long for callback data");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_payloads() {
        assert_eq!(
            CallbackIntent::parse("show_categories"),
            Some(CallbackIntent::ShowCategories)
        );
        assert_eq!(CallbackIntent::parse("help"), Some(CallbackIntent::Help));
        assert_eq!(
            CallbackIntent::parse("category_University"),
            Some(CallbackIntent::Category("University".to_string()))
        );
        assert_eq!(CallbackIntent::parse("answer_17"), Some(CallbackIntent::Answer(17)));
    }

    #[test]
    fn test_prefix_routes_are_exclusive() {
        // a category payload never routes to the answer or list handlers
        let intent = CallbackIntent::parse("category_University").unwrap();
        assert!(!matches!(intent, CallbackIntent::Answer(_)));
        assert_ne!(intent, CallbackIntent::ShowCategories);

        // exact matches only for the fixed payloads
        assert_eq!(CallbackIntent::parse("show_categories_extra"), None);
        assert_eq!(CallbackIntent::parse("helpme"), None);
    }

    #[test]
    fn test_parse_rejects_malformed_payloads() {
        assert_eq!(CallbackIntent::parse(""), None);
        assert_eq!(CallbackIntent::parse("category_"), None);
        assert_eq!(CallbackIntent::parse("answer_"), None);
        assert_eq!(CallbackIntent::parse("answer_abc"), None);
        assert_eq!(CallbackIntent::parse("edit_1"), None);
    }

    #[test]
    fn test_payload_round_trip() {
        let intents = [
            CallbackIntent::ShowCategories,
            CallbackIntent::Help,
            CallbackIntent::Category("Leisure".to_string()),
            CallbackIntent::Answer(3),
        ];
        for intent in intents {
            assert_eq!(CallbackIntent::parse(&intent.to_payload()), Some(intent));
        }
    }

    #[test]
    fn test_category_name_validation() {
        assert!(validate_category_name("University").is_ok());
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name("Student_Life").is_err());
        assert!(validate_category_name(&"a".repeat(55)).is_ok());
        assert!(validate_category_name(&"a".repeat(56)).is_err());
    }
}
