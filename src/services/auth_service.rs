//! Domain service for authentication.

use thiserror::Error;

use crate::models::user::User;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the email is unknown or the
    /// password does not match.
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Resolves the user id stored in a session. `None` when the account no
    /// longer exists.
    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError>;
}
