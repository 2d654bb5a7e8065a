//! # Catalog Store Module
//!
//! PostgreSQL storage for FAQ categories and questions. The bot reads it
//! through the [`Catalog`] trait; seeding and schema setup are inherent
//! methods of [`CatalogStore`] used only at startup.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::callback_data::validate_category_name;
use crate::config::DatabaseConfig;
use crate::errors::CatalogError;

/// How long a query waits for the single connection before failing
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// A topic grouping questions
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    /// Stable key used in button payloads
    pub name: String,
    /// Label shown to users
    pub name_localized: String,
}

/// A question with its answer
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Question {
    pub id: i32,
    pub text: String,
    pub answer: String,
    pub category_id: i32,
}

/// Category row to seed
#[derive(Debug, Clone, Copy)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub name_localized: &'a str,
}

/// Question row to seed, attached to a category by name
#[derive(Debug, Clone, Copy)]
pub struct NewQuestion<'a> {
    pub text: &'a str,
    pub answer: &'a str,
    pub category: &'a str,
}

/// Read access to the FAQ catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All categories, ordered by id
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Questions of the category with this name; empty for unknown names
    async fn list_questions(&self, category_name: &str) -> Result<Vec<Question>, CatalogError>;

    /// One question, or [`CatalogError::QuestionNotFound`]
    async fn get_question(&self, id: i32) -> Result<Question, CatalogError>;
}

/// Catalog backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pool: PgPool,
}

impl CatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a store whose single connection is opened on first use.
    ///
    /// Never fails: an unreachable database shows up as errors on the first
    /// query, so the bot can start and report them instead of exiting.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(config.connect_options());
        Self::new(pool)
    }

    /// Create the tables if they do not exist
    pub async fn init_schema(&self) -> Result<(), CatalogError> {
        info!("Initializing catalog schema...");

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS categories (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                name_localized VARCHAR(255) NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS questions (
                id SERIAL PRIMARY KEY,
                question_text TEXT NOT NULL,
                answer TEXT NOT NULL,
                category_id INTEGER NOT NULL REFERENCES categories(id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS questions_category_id_idx ON questions (category_id)",
        )
        .execute(&self.pool)
        .await?;

        info!("Catalog schema initialized successfully");
        Ok(())
    }

    /// Insert categories that do not exist yet, matching on `name`.
    ///
    /// Returns the number of rows actually inserted.
    pub async fn seed_categories(
        &self,
        categories: &[NewCategory<'_>],
    ) -> Result<u64, CatalogError> {
        for category in categories {
            validate_category_name(category.name).map_err(|reason| {
                CatalogError::InvalidCategoryName {
                    name: category.name.to_string(),
                    reason,
                }
            })?;
        }

        let mut inserted = 0;
        for category in categories {
            let result = sqlx::query(
                "INSERT INTO categories (name, name_localized)
                 VALUES ($1, $2)
                 ON CONFLICT (name) DO NOTHING",
            )
            .bind(category.name)
            .bind(category.name_localized)
            .execute(&self.pool)
            .await?;
            inserted += result.rows_affected();
        }

        info!(inserted, total = categories.len(), "Categories seeded");
        Ok(inserted)
    }

    /// Insert questions unless the same text already exists in the same
    /// category. Questions naming an unknown category are skipped.
    pub async fn seed_questions(&self, questions: &[NewQuestion<'_>]) -> Result<u64, CatalogError> {
        let mut inserted = 0;
        for question in questions {
            let category_id: Option<i32> =
                sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
                    .bind(question.category)
                    .fetch_optional(&self.pool)
                    .await?;

            let Some(category_id) = category_id else {
                warn!(category = %question.category, "Skipping seed question for unknown category");
                continue;
            };

            let result = sqlx::query(
                "INSERT INTO questions (question_text, answer, category_id)
                 SELECT $1::TEXT, $2::TEXT, $3
                 WHERE NOT EXISTS (
                     SELECT 1 FROM questions
                     WHERE question_text = $1::TEXT AND category_id = $3
                 )",
            )
            .bind(question.text)
            .bind(question.answer)
            .bind(category_id)
            .execute(&self.pool)
            .await?;
            inserted += result.rows_affected();
        }

        info!(inserted, total = questions.len(), "Questions seeded");
        Ok(inserted)
    }

    pub async fn count_categories(&self) -> Result<i64, CatalogError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_questions(&self) -> Result<i64, CatalogError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Close the pool; waits for the connection to be returned
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Catalog store closed");
    }
}

#[async_trait]
impl Catalog for CatalogStore {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        debug!("Listing categories");

        sqlx::query_as::<_, Category>("SELECT id, name, name_localized FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list categories");
                CatalogError::from(e)
            })
    }

    async fn list_questions(&self, category_name: &str) -> Result<Vec<Question>, CatalogError> {
        debug!(category = %category_name, "Listing questions");

        sqlx::query_as::<_, Question>(
            "SELECT q.id, q.question_text AS text, q.answer, q.category_id
             FROM questions q
             INNER JOIN categories c ON q.category_id = c.id
             WHERE c.name = $1
             ORDER BY q.id",
        )
        .bind(category_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(category = %category_name, error = %e, "Failed to list questions");
            CatalogError::from(e)
        })
    }

    async fn get_question(&self, id: i32) -> Result<Question, CatalogError> {
        debug!(question_id = id, "Reading question");

        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question_text AS text, answer, category_id FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(question_id = id, error = %e, "Failed to read question");
            CatalogError::from(e)
        })?;

        match question {
            Some(question) => Ok(question),
            None => {
                info!(question_id = id, "No question found");
                Err(CatalogError::QuestionNotFound(id))
            }
        }
    }
}
