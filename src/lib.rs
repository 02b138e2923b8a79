use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::response::Html;
use handlebars::{DirectorySourceOptions, Handlebars, TemplateError};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;

use error::WebError;
use store::{JokeStore, PostSource, SessionStore};

pub struct AppState {
    pub templates: Handlebars<'static>,
    pub jokes: Arc<dyn JokeStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub posts: Arc<dyn PostSource>,
}

impl AppState {
    pub fn new(
        templates: Handlebars<'static>,
        jokes: Arc<dyn JokeStore>,
        sessions: Arc<dyn SessionStore>,
        posts: Arc<dyn PostSource>,
    ) -> Self {
        Self {
            templates,
            jokes,
            sessions,
            posts,
        }
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, WebError> {
        Ok(Html(self.templates.render(name, data)?))
    }
}

/// Registers every `.hbs` file under `dir`, named by its path without the
/// extension.
pub fn load_templates(dir: &Path, dev_mode: bool) -> Result<Handlebars<'static>, TemplateError> {
    let mut templates = Handlebars::new();
    templates.set_dev_mode(dev_mode);
    templates.register_templates_directory(dir, DirectorySourceOptions::default())?;
    Ok(templates)
}

pub fn app(app_state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .merge(routes::get_web_router())
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            session::session_middleware,
        ))
        // STATIC CONTENT
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        // STATE
        .with_state(app_state)
}
