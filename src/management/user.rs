use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::sync::Mutex;

use crate::{
    error::StorageError,
    types::{ScoreOutcome, User},
};

/// Persistence for player profiles and their high score.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates the user unless a row for `external_id` already exists.
    ///
    /// Returns `true` when a row was created. Existing rows are left untouched,
    /// including their display name.
    async fn ensure_user(&self, external_id: &str, display_name: &str) -> Result<bool, StorageError>;

    /// `Ok(None)` means the user does not exist; `Err` is a genuine failure.
    async fn find_user(&self, external_id: &str) -> Result<Option<User>, StorageError>;

    /// Stores `score` only if it beats the current high score.
    async fn raise_high_score(
        &self,
        external_id: &str,
        score: i64,
    ) -> Result<ScoreOutcome, StorageError>;
}

/// Postgres-backed store, compatible with the `users` table of the hosted
/// deployment.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    async fn initialize(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                spotify_id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                score_game_1 BIGINT NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn ensure_user(&self, external_id: &str, display_name: &str) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (spotify_id, display_name, created_at, score_game_1)
            VALUES ($1, $2, $3, 0)
            ON CONFLICT (spotify_id) DO NOTHING
            "#,
        )
        .bind(external_id)
        .bind(display_name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_user(&self, external_id: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query_as::<_, (String, String, DateTime<Utc>, i64)>(
            r#"
            SELECT spotify_id, display_name, created_at, COALESCE(score_game_1, 0)::BIGINT
            FROM users
            WHERE spotify_id = $1
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(external_id, display_name, created_at, high_score)| User {
            external_id,
            display_name,
            created_at,
            high_score,
        }))
    }

    async fn raise_high_score(
        &self,
        external_id: &str,
        score: i64,
    ) -> Result<ScoreOutcome, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET score_game_1 = $2
            WHERE spotify_id = $1 AND COALESCE(score_game_1, 0) < $2
            "#,
        )
        .bind(external_id)
        .bind(score)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(ScoreOutcome::Raised);
        }

        let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM users WHERE spotify_id = $1")
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?
            .is_some();

        Ok(if exists {
            ScoreOutcome::Kept
        } else {
            ScoreOutcome::UnknownUser
        })
    }
}

/// Process-local store used when no `DATABASE_URL` is configured.
///
/// Data lives as long as the process; it is meant for local development and
/// tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.lock().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn ensure_user(&self, external_id: &str, display_name: &str) -> Result<bool, StorageError> {
        let mut users = self.users.lock().await;
        if users.contains_key(external_id) {
            return Ok(false);
        }

        users.insert(
            external_id.to_string(),
            User {
                external_id: external_id.to_string(),
                display_name: display_name.to_string(),
                created_at: Utc::now(),
                high_score: 0,
            },
        );
        Ok(true)
    }

    async fn find_user(&self, external_id: &str) -> Result<Option<User>, StorageError> {
        Ok(self.users.lock().await.get(external_id).cloned())
    }

    async fn raise_high_score(
        &self,
        external_id: &str,
        score: i64,
    ) -> Result<ScoreOutcome, StorageError> {
        let mut users = self.users.lock().await;
        let Some(user) = users.get_mut(external_id) else {
            return Ok(ScoreOutcome::UnknownUser);
        };

        if score > user.high_score {
            user.high_score = score;
            Ok(ScoreOutcome::Raised)
        } else {
            Ok(ScoreOutcome::Kept)
        }
    }
}
