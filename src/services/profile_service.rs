//! Domain service behind the profile page.

use thiserror::Error;

use crate::domain::Actor;
use crate::models::program::Program;
use crate::models::user::User;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ProfileError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ProfileError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileOverview {
    /// Every registered user, not only the viewer.
    pub users: Vec<User>,
    /// The viewer's favorite programs; empty for anonymous visitors.
    pub favorites: Vec<Program>,
}

#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    async fn overview(&self, viewer: Option<&Actor>) -> Result<ProfileOverview, ProfileError>;
}
