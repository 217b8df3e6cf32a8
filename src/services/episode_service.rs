//! Domain service for episode management and episode comments.

use thiserror::Error;

use crate::domain::Actor;
use crate::forms::FieldErrors;
use crate::models::episode::{Comment, Episode, EpisodeDetail, EpisodeInput, EpisodeListItem};
use crate::models::program::{Program, Season};
use crate::services::mailer::MailError;

#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("Episode not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Invalid(FieldErrors),

    #[error("Notification failed: {0}")]
    Notification(#[from] MailError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for EpisodeError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for EpisodeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A program selectable in the episode form, with its seasons.
#[derive(Debug, Clone)]
pub struct ProgramChoice {
    pub program: Program,
    pub seasons: Vec<Season>,
}

#[async_trait::async_trait]
pub trait EpisodeService: Send + Sync {
    async fn list(&self) -> Result<Vec<EpisodeListItem>, EpisodeError>;

    /// Programs and seasons offered by the create and edit forms.
    async fn choices(&self) -> Result<Vec<ProgramChoice>, EpisodeError>;

    /// Persists a new episode, then sends the new-episode notification.
    ///
    /// # Errors
    ///
    /// - [`EpisodeError::Invalid`] when the program does not exist or the
    ///   season belongs to another program
    /// - [`EpisodeError::Notification`] when the email could not be sent; the
    ///   episode is stored regardless
    async fn create(&self, input: EpisodeInput) -> Result<Episode, EpisodeError>;

    /// Episode with its program, season and comments (oldest first).
    async fn view(&self, slug: &str) -> Result<EpisodeDetail, EpisodeError>;

    /// Attaches a comment by `actor` to the episode at `slug`.
    async fn add_comment(
        &self,
        actor: &Actor,
        slug: &str,
        body: String,
    ) -> Result<Comment, EpisodeError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Episode, EpisodeError>;

    /// Any logged-in user may edit any episode.
    async fn edit(&self, slug: &str, input: EpisodeInput) -> Result<Episode, EpisodeError>;

    async fn find_by_id(&self, id: i32) -> Result<Episode, EpisodeError>;

    async fn delete(&self, id: i32) -> Result<(), EpisodeError>;
}
