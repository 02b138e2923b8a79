use async_trait::async_trait;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use super::{JokeStore, SessionStore, StoreError};
use crate::models::{Joke, NewJoke};
use crate::session::{Session, session_expired};

const JOKE_COLUMNS: &str = "id, jokester_id, name, content, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    session_timeout: i64,
}

impl PgStore {
    pub fn new(pool: PgPool, session_timeout: i64) -> Self {
        Self {
            pool,
            session_timeout,
        }
    }
}

#[async_trait]
impl JokeStore for PgStore {
    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM Jokes;")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn find_many(&self, take: u64, skip: u64) -> Result<Vec<Joke>, StoreError> {
        let jokes = sqlx::query_as::<_, Joke>(&format!(
            "SELECT {JOKE_COLUMNS} FROM Jokes ORDER BY created_at, id LIMIT $1 OFFSET $2;"
        ))
        .bind(i64::try_from(take).unwrap_or(i64::MAX))
        .bind(i64::try_from(skip).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(jokes)
    }

    async fn find_unique(&self, id: Uuid) -> Result<Option<Joke>, StoreError> {
        let joke = sqlx::query_as::<_, Joke>(&format!(
            "SELECT {JOKE_COLUMNS} FROM Jokes WHERE id = $1 LIMIT 1;"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(joke)
    }

    async fn create(&self, joke: NewJoke) -> Result<Joke, StoreError> {
        let joke = sqlx::query_as::<_, Joke>(&format!(
            "INSERT INTO Jokes (jokester_id, name, content) VALUES ($1, $2, $3) RETURNING {JOKE_COLUMNS};"
        ))
        .bind(joke.jokester_id)
        .bind(joke.name)
        .bind(joke.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(joke)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn resolve(&self, token: Uuid) -> Result<Session, StoreError> {
        let session: Option<(Uuid, time::OffsetDateTime)> =
            sqlx::query_as("SELECT user_id, last_active FROM UserTokens WHERE token = $1 LIMIT 1;")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        let Some((user_id, last_active)) = session else {
            return Ok(Session::Invalid);
        };

        if session_expired(last_active, time::OffsetDateTime::now_utc(), self.session_timeout) {
            sqlx::query("DELETE FROM UserTokens WHERE token = $1;")
                .bind(token)
                .execute(&self.pool)
                .await?;
            return Ok(Session::Expired);
        }

        sqlx::query("UPDATE UserTokens SET last_active = now() WHERE token = $1;")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(Session::Active { user_id })
    }
}
