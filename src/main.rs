use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use jokes::config::Config;
use jokes::store::{PgStore, StaticPosts};
use jokes::{AppState, app, load_templates};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine when the environment is already set.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db_pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.db_url)
        .await
        .context("DB connection failed")?;

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .context("Failed to perform migrations")?;

    let templates = load_templates(&config.template_dir, config.template_dev_mode)
        .with_context(|| format!("loading templates from {}", config.template_dir.display()))?;

    let store = Arc::new(PgStore::new(db_pool, config.session_timeout));
    let app_state = AppState::new(
        templates,
        store.clone(),
        store,
        Arc::new(StaticPosts::default()),
    );

    let listener = tokio::net::TcpListener::bind(&config.host)
        .await
        .with_context(|| format!("failed to bind {}", config.host))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app(Arc::new(app_state), &config.static_dir)).await?;

    Ok(())
}
