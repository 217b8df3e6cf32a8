use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use crate::services::{AuthError, EpisodeError, ProfileError, ProgramError};

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    status_code: u16,
    reason: &'a str,
    message: &'a str,
}

#[derive(Debug)]
pub enum WebError {
    NotFound(String),

    Forbidden(String),

    BadRequest(String),

    InternalError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Forbidden(msg) => {
                tracing::warn!("Access denied: {}", msg);
                (StatusCode::FORBIDDEN, msg.clone())
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let page = ErrorPage {
            status_code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message: &message,
        };

        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, message).into_response()
            }
        }
    }
}

impl WebError {
    pub fn not_found(resource: &str, key: impl fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {key} not found"))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }
}

impl From<anyhow::Error> for WebError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        Self::InternalError(format!("Template error: {err}"))
    }
}

impl From<tower_sessions::session::Error> for WebError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::InternalError(format!("Session error: {err}"))
    }
}

impl From<ProgramError> for WebError {
    fn from(err: ProgramError) -> Self {
        match err {
            ProgramError::NotFound(slug) => Self::not_found("Program", slug),
            ProgramError::Forbidden => {
                Self::Forbidden("Only the owner can edit this program".to_string())
            }
            ProgramError::Invalid(errors) => Self::BadRequest(errors.to_string()),
            ProgramError::Notification(e) => Self::InternalError(e.to_string()),
            ProgramError::Database(msg) | ProgramError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<EpisodeError> for WebError {
    fn from(err: EpisodeError) -> Self {
        match err {
            EpisodeError::NotFound(slug) => Self::not_found("Episode", slug),
            EpisodeError::Invalid(errors) => Self::BadRequest(errors.to_string()),
            EpisodeError::Notification(e) => Self::InternalError(e.to_string()),
            EpisodeError::Database(msg) | EpisodeError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<ProfileError> for WebError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Database(msg) | ProfileError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::BadRequest("Invalid credentials".to_string()),
            AuthError::Database(msg) | AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}
