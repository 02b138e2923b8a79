//! Persistence collaborators used by the route handlers.
//!
//! Handlers only see the traits; `AppState` decides which implementation
//! backs them.
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Joke, NewJoke, Post};
use crate::session::Session;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod postgres;
pub mod posts;

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use posts::StaticPosts;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait JokeStore: Send + Sync {
    async fn count(&self) -> Result<u64, StoreError>;

    /// Jokes in storage order, skipping `skip` and returning at most `take`.
    async fn find_many(&self, take: u64, skip: u64) -> Result<Vec<Joke>, StoreError>;

    async fn find_unique(&self, id: Uuid) -> Result<Option<Joke>, StoreError>;

    async fn create(&self, joke: NewJoke) -> Result<Joke, StoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolves a session token. Never returns `Session::Anonymous`; that
    /// state is decided before a token exists.
    async fn resolve(&self, token: Uuid) -> Result<Session, StoreError>;
}

#[async_trait]
pub trait PostSource: Send + Sync {
    async fn get_posts(&self) -> Result<Vec<Post>, StoreError>;
}
