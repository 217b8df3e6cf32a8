use askama::Template;
use axum::{
    Form,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::flash::{self, Level};
use super::page::{Layout, render, render_with_status};
use super::{AppState, WebError};
use crate::domain::Actor;
use crate::forms::LoginForm;
use crate::models::user::User;
use crate::services::AuthError;

const USER_KEY: &str = "user_id";

// ============================================================================
// Request identity
// ============================================================================

/// The user behind the current request, if any. Inserted by
/// [`identity_middleware`].
#[derive(Debug, Clone, Default)]
pub struct Identity(Option<User>);

impl Identity {
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    #[must_use]
    pub fn actor(&self) -> Option<Actor> {
        self.0.as_ref().map(Actor::from)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_default())
    }
}

/// Extracts the logged-in user; anonymous requests are sent to the login page.
pub struct CurrentUser(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .and_then(Identity::actor)
            .map(Self)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Loads the session's user once per request.
pub async fn identity_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let user = match session.get::<i32>(USER_KEY).await? {
        Some(user_id) => state.auth.current_user(user_id).await?,
        None => None,
    };

    if let Some(user) = &user {
        tracing::Span::current().record("user_id", user.id);
    }

    request.extensions_mut().insert(Identity(user));
    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Template)]
#[template(path = "security/login.html")]
struct LoginPage {
    layout: Layout,
    email: String,
    error: String,
}

/// GET /login
pub async fn login_page(session: Session, identity: Identity) -> Result<Response, WebError> {
    render(&LoginPage {
        layout: Layout::new(&session, &identity, "Log in").await?,
        email: String::new(),
        error: String::new(),
    })
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let (email, password) = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            return render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                &LoginPage {
                    layout: Layout::new(&session, &identity, "Log in").await?,
                    email: form.email,
                    error: errors.to_string(),
                },
            );
        }
    };

    match state.auth.login(&email, &password).await {
        Ok(user) => {
            session.cycle_id().await?;
            session.insert(USER_KEY, user.id).await?;
            flash::push(&session, Level::Success, format!("Welcome, {}!", user.email)).await?;
            Ok(Redirect::to("/program/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!(event = "login_failed", email = %email, "Invalid credentials");
            render_with_status(
                StatusCode::UNAUTHORIZED,
                &LoginPage {
                    layout: Layout::new(&session, &identity, "Log in").await?,
                    email,
                    error: "Invalid credentials.".to_string(),
                },
            )
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /logout
pub async fn logout(session: Session) -> Result<Redirect, WebError> {
    session.flush().await?;
    Ok(Redirect::to("/program/"))
}
