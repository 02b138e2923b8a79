use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{JokeStore, SessionStore, StoreError};
use crate::models::{Joke, NewJoke};
use crate::session::{Session, session_expired};

/// Process-local stand-in for `PgStore`. Sessions only expire when a
/// timeout is set.
#[derive(Default)]
pub struct MemoryStore {
    jokes: RwLock<Vec<Joke>>,
    // token -> (user_id, last_active)
    tokens: RwLock<HashMap<Uuid, (Uuid, OffsetDateTime)>>,
    session_timeout: Option<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_timeout(session_timeout: i64) -> Self {
        Self {
            session_timeout: Some(session_timeout),
            ..Self::default()
        }
    }

    /// Issues a session token for `user_id`.
    pub async fn open_session(&self, user_id: Uuid) -> Uuid {
        self.open_session_at(user_id, OffsetDateTime::now_utc()).await
    }

    /// Issues a session token last used at `last_active`.
    pub async fn open_session_at(&self, user_id: Uuid, last_active: OffsetDateTime) -> Uuid {
        let token = Uuid::new_v4();
        self.tokens
            .write()
            .await
            .insert(token, (user_id, last_active));
        token
    }

    pub async fn has_session(&self, token: Uuid) -> bool {
        self.tokens.read().await.contains_key(&token)
    }

    pub async fn jokes(&self) -> Vec<Joke> {
        self.jokes.read().await.clone()
    }
}

#[async_trait]
impl JokeStore for MemoryStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.jokes.read().await.len() as u64)
    }

    async fn find_many(&self, take: u64, skip: u64) -> Result<Vec<Joke>, StoreError> {
        let jokes = self.jokes.read().await;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = usize::try_from(take).unwrap_or(usize::MAX);

        Ok(jokes.iter().skip(skip).take(take).cloned().collect())
    }

    async fn find_unique(&self, id: Uuid) -> Result<Option<Joke>, StoreError> {
        Ok(self.jokes.read().await.iter().find(|j| j.id == id).cloned())
    }

    async fn create(&self, joke: NewJoke) -> Result<Joke, StoreError> {
        let now = OffsetDateTime::now_utc();
        let joke = Joke {
            id: Uuid::new_v4(),
            jokester_id: joke.jokester_id,
            name: joke.name,
            content: joke.content,
            created_at: now,
            updated_at: now,
        };

        self.jokes.write().await.push(joke.clone());
        Ok(joke)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn resolve(&self, token: Uuid) -> Result<Session, StoreError> {
        let mut tokens = self.tokens.write().await;
        let Some(&(user_id, last_active)) = tokens.get(&token) else {
            return Ok(Session::Invalid);
        };

        let now = OffsetDateTime::now_utc();
        if let Some(timeout) = self.session_timeout {
            if session_expired(last_active, now, timeout) {
                tokens.remove(&token);
                return Ok(Session::Expired);
            }
        }

        tokens.insert(token, (user_id, now));
        Ok(Session::Active { user_id })
    }
}
