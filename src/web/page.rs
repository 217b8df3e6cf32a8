//! Pieces shared by every HTML page: the layout data and form field views.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tower_sessions::Session;

use super::WebError;
use super::auth::Identity;
use super::flash::{self, Flash};
use crate::forms::FieldErrors;

/// Data the base layout needs on every page.
pub struct Layout {
    pub title: String,
    pub logged_in: bool,
    pub user_email: String,
    pub flashes: Vec<Flash>,
}

impl Layout {
    /// Consumes the pending flash messages.
    pub async fn new(
        session: &Session,
        identity: &Identity,
        title: impl Into<String>,
    ) -> Result<Self, WebError> {
        let user = identity.user();
        Ok(Self {
            title: title.into(),
            logged_in: user.is_some(),
            user_email: user.map(|u| u.email.clone()).unwrap_or_default(),
            flashes: flash::take(session).await?,
        })
    }
}

/// A form input with its submitted value and messages.
#[derive(Debug, Clone, Default)]
pub struct FieldView {
    pub value: String,
    pub errors: Vec<String>,
}

impl FieldView {
    pub fn new(value: &str, errors: &FieldErrors, name: &str) -> Self {
        Self {
            value: value.to_string(),
            errors: errors.get(name).to_vec(),
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Hidden-field data for a delete button.
#[derive(Debug, Clone, Default)]
pub struct DeleteButton {
    pub action: String,
    pub token: String,
}

pub fn render<T: Template>(template: &T) -> Result<Response, WebError> {
    Ok(Html(template.render()?).into_response())
}

pub fn render_with_status<T: Template>(
    status: StatusCode,
    template: &T,
) -> Result<Response, WebError> {
    Ok((status, Html(template.render()?)).into_response())
}

/// Shortens long text for list pages.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("a long synopsis", 6), "a long…");
    }

    #[test]
    fn test_field_view_picks_its_errors() {
        let errors = FieldErrors::single("title", "This value should not be blank.");
        let title = FieldView::new("", &errors, "title");
        let synopsis = FieldView::new("text", &errors, "synopsis");

        assert!(title.has_errors());
        assert!(!synopsis.has_errors());
        assert_eq!(synopsis.value, "text");
    }
}
