use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::AppState;
use crate::error::WebError;

pub const SESSION_COOKIE: &str = "token";

/// Identity attached to a single request by `session_middleware`.
#[derive(Clone, Debug, Serialize)]
pub enum Session {
    Active { user_id: Uuid },
    Expired,
    Invalid,
    Anonymous,
}

impl Session {
    /// The signed-in user, if any.
    pub fn get_user_id(&self) -> Option<Uuid> {
        match self {
            Session::Active { user_id } => Some(*user_id),
            _ => None,
        }
    }

    /// Like `get_user_id`, but aborts the request when nobody is signed in.
    pub fn require_user_id(&self) -> Result<Uuid, WebError> {
        self.get_user_id().ok_or(WebError::SessionRequired)
    }
}

/// A session is stale once `timeout` whole seconds have passed since it
/// was last used.
pub fn session_expired(last_active: OffsetDateTime, now: OffsetDateTime, timeout: i64) -> bool {
    (now - last_active).whole_seconds() >= timeout
}

pub async fn resolve_session(
    app_state: &AppState,
    cookie_jar: &CookieJar,
) -> Result<Session, WebError> {
    let Some(value) = cookie_jar
        .get(SESSION_COOKIE)
        .map(|c| c.value_trimmed())
        .filter(|v| !v.is_empty())
    else {
        return Ok(Session::Anonymous);
    };

    let token = match Uuid::from_str(value) {
        Ok(token) => token,
        Err(_) => {
            tracing::warn!("malformed session token");
            return Ok(Session::Invalid);
        }
    };

    Ok(app_state.sessions.resolve(token).await?)
}

pub async fn session_middleware(
    app_state: State<Arc<AppState>>,
    cookie_jar: CookieJar,
    mut req: Request,
    nxt: Next,
) -> Result<Response, WebError> {
    let session = resolve_session(&app_state, &cookie_jar).await?;
    req.extensions_mut().insert(session.clone());

    let response = nxt.run(req).await;

    Ok(match session {
        Session::Expired | Session::Invalid => {
            tracing::debug!(?session, "clearing session cookie");
            let removal = Cookie::build(SESSION_COOKIE).path("/");
            (cookie_jar.remove(removal), response).into_response()
        }
        Session::Active { .. } | Session::Anonymous => response,
    })
}
