use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::store::StoreError;

pub const UNEXPECTED_ERROR: &str = "Something unexpected went wrong. Sorry about that.";

/// Failures that end a request. Each one renders its own response, so
/// handlers can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("login required")]
    Unauthorized,
    #[error("session required")]
    SessionRequired,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("error rendering page: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Unauthorized | WebError::SessionRequired => StatusCode::UNAUTHORIZED,
            WebError::Store(_) | WebError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            WebError::NotFound(message) => (status, error_page(message)).into_response(),
            WebError::Unauthorized => (
                status,
                error_page(
                    "<p>You must be logged in to create a joke.</p>\n<a href=\"/login\">Login</a>",
                ),
            )
                .into_response(),
            WebError::SessionRequired => (status, "Unauthorized").into_response(),
            err @ (WebError::Store(_) | WebError::Render(_)) => {
                tracing::error!(error = %err, "request failed");
                (status, error_page(UNEXPECTED_ERROR)).into_response()
            }
        }
    }
}

// Bodies here are fixed strings, never user input.
fn error_page(body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Jokes</title><link rel=\"stylesheet\" href=\"/static/jokes.css\"></head>\n<body>\n<div class=\"error-container\">\n{body}\n</div>\n</body>\n</html>\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_kind() {
        assert_eq!(
            WebError::NotFound("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebError::SessionRequired.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebError::Store(StoreError::Database(sqlx::Error::RowNotFound)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
