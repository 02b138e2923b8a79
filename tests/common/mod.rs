#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use jokes::store::{MemoryStore, StaticPosts};
use jokes::{AppState, app, load_templates};
use uuid::Uuid;

pub struct TestApp {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Opens a session for a fresh user and returns the user id together
    /// with the matching `Cookie` header value.
    pub async fn login(&self) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let token = self.store.open_session(user_id).await;
        (user_id, format!("token={token}"))
    }
}

/// Serves the full router on an ephemeral port, backed by the in-memory store.
pub async fn spawn_app() -> Result<TestApp> {
    spawn_app_with(MemoryStore::new()).await
}

pub async fn spawn_app_with(store: MemoryStore) -> Result<TestApp> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let templates = load_templates(&root.join("templates"), false)?;

    let store = Arc::new(store);
    let app_state = AppState::new(
        templates,
        store.clone(),
        store.clone(),
        Arc::new(StaticPosts::default()),
    );
    let router = app(Arc::new(app_state), &root.join("static"));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(TestApp {
        base_url,
        store,
        client,
    })
}
