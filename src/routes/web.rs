use std::sync::Arc;

use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use rand::Rng;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::WebError;
use crate::forms::{ActionData, JokeForm};
use crate::models::NewJoke;
use crate::session::Session;

pub const NO_JOKES: &str = "There are no jokes to display.";
pub const JOKE_NOT_FOUND: &str = "Joke not found";

#[axum::debug_handler]
pub async fn view_joke(
    app_state: State<Arc<AppState>>,
    Path(joke_id): Path<Uuid>,
) -> Result<Html<String>, WebError> {
    let joke = app_state
        .jokes
        .find_unique(joke_id)
        .await?
        .ok_or(WebError::NotFound(JOKE_NOT_FOUND))?;

    app_state.render("joke-view", &json!({ "joke": joke }))
}

#[axum::debug_handler]
pub async fn view_random_joke(
    app_state: State<Arc<AppState>>,
) -> Result<Html<String>, WebError> {
    let count = app_state.jokes.count().await?;
    if count == 0 {
        return Err(WebError::NotFound(NO_JOKES));
    }

    let offset = rand::thread_rng().gen_range(0..count);

    // Rows can disappear between the count and the fetch.
    let random_joke = app_state
        .jokes
        .find_many(1, offset)
        .await?
        .into_iter()
        .next()
        .ok_or(WebError::NotFound(NO_JOKES))?;

    app_state.render("joke-random", &json!({ "joke": random_joke }))
}

#[axum::debug_handler]
pub async fn view_joke_form(
    app_state: State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Html<String>, WebError> {
    if session.get_user_id().is_none() {
        return Err(WebError::Unauthorized);
    }

    app_state.render("joke-form", &ActionData::default())
}

#[axum::debug_handler]
pub async fn new_joke(
    app_state: State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, WebError> {
    let user_id = session.require_user_id()?;

    let form = match form {
        Ok(Form(pairs)) => JokeForm::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected joke submission");
            return rerender_form(&app_state, &ActionData::form_error());
        }
    };

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(action_data) => return rerender_form(&app_state, &action_data),
    };

    let joke = app_state
        .jokes
        .create(NewJoke {
            jokester_id: user_id,
            name: fields.name,
            content: fields.content,
        })
        .await?;

    tracing::info!(joke_id = %joke.id, jokester_id = %user_id, "joke created");

    Ok(Redirect::to(&format!("/jokes/{}", joke.id)).into_response())
}

fn rerender_form(app_state: &AppState, action_data: &ActionData) -> Result<Response, WebError> {
    Ok((
        StatusCode::BAD_REQUEST,
        app_state.render("joke-form", action_data)?,
    )
        .into_response())
}

#[axum::debug_handler]
pub async fn view_posts(app_state: State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    let posts = app_state.posts.get_posts().await?;

    app_state.render("post-list", &json!({ "posts": posts }))
}
