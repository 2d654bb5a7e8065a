//! Fixed FAQ content and the startup bootstrap that loads it.

use tracing::info;

use crate::db::{CatalogStore, NewCategory, NewQuestion};
use crate::errors::CatalogError;

pub const CATEGORIES: &[NewCategory<'static>] = &[
    NewCategory {
        name: "University",
        name_localized: "Університет",
    },
    NewCategory {
        name: "Administrative",
        name_localized: "Адміністративні питання",
    },
    NewCategory {
        name: "Leisure",
        name_localized: "Відпочинок",
    },
];

pub const QUESTIONS: &[NewQuestion<'static>] = &[
    NewQuestion {
        text: "Як українському студенту вступити до французького університету?",
        answer: "Не так вже й просто.",
        category: "University",
    },
    NewQuestion {
        text: "Як українцю отримати APS?",
        answer: "Зверніться до префектури.",
        category: "Administrative",
    },
    NewQuestion {
        text: "Як українцю отримати виплати?",
        answer: "Зверніться до OFII.",
        category: "Administrative",
    },
    NewQuestion {
        text: "Що таке TP?",
        answer: "Це практичне заняття.",
        category: "University",
    },
    NewQuestion {
        text: "Що можна робити зі студентським квитком?",
        answer: "Вільно відвідувати музеї.",
        category: "Leisure",
    },
    NewQuestion {
        text: "Як студент може поїхати у відпустку?",
        answer: "Зверніться до depart 18:25.",
        category: "Leisure",
    },
];

/// Rows inserted by one bootstrap run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub categories_inserted: u64,
    pub questions_inserted: u64,
}

/// Create the schema and load the fixed catalog. Safe to run on every start.
pub async fn bootstrap(store: &CatalogStore) -> Result<SeedReport, CatalogError> {
    store.init_schema().await?;

    let report = SeedReport {
        categories_inserted: store.seed_categories(CATEGORIES).await?,
        questions_inserted: store.seed_questions(QUESTIONS).await?,
    };

    info!(
        categories_inserted = report.categories_inserted,
        questions_inserted = report.questions_inserted,
        "Catalog bootstrap completed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback_data::validate_category_name;
    use std::collections::HashSet;

    #[test]
    fn test_seed_category_names_are_routable() {
        for category in CATEGORIES {
            assert!(validate_category_name(category.name).is_ok(), "{}", category.name);
        }
    }

    #[test]
    fn test_seed_category_names_unique() {
        let names: HashSet<_> = CATEGORIES.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), CATEGORIES.len());
    }

    #[test]
    fn test_seed_questions_reference_seed_categories() {
        let names: HashSet<_> = CATEGORIES.iter().map(|c| c.name).collect();
        for question in QUESTIONS {
            assert!(names.contains(question.category), "{}", question.text);
        }
    }
}
