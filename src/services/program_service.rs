//! Domain service for program management.
//!
//! Listing, creation (with notification), ownership-checked edits, deletion
//! and the favorites toggle.

use thiserror::Error;

use crate::domain::Actor;
use crate::forms::FieldErrors;
use crate::models::program::{Program, ProgramDetail, ProgramInput};
use crate::services::mailer::MailError;

/// Errors specific to program operations.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("Program not found: {0}")]
    NotFound(String),

    #[error("Only the owner of a program can edit it")]
    Forbidden,

    #[error("Validation failed: {0}")]
    Invalid(FieldErrors),

    #[error("Notification failed: {0}")]
    Notification(#[from] MailError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ProgramError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ProgramError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for programs.
#[async_trait::async_trait]
pub trait ProgramService: Send + Sync {
    /// All programs by title, or only those whose title contains `search`
    /// (case-insensitive) when a term is given.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Program>, ProgramError>;

    /// Persists a new program owned by `actor`, then sends the new-program
    /// notification.
    ///
    /// # Errors
    ///
    /// - [`ProgramError::Invalid`] when the title's slug is already used
    /// - [`ProgramError::Notification`] when the email could not be sent; the
    ///   program is stored regardless
    async fn create(&self, actor: &Actor, input: ProgramInput) -> Result<Program, ProgramError>;

    /// Detail page data. `viewer` only affects the favorite flag.
    async fn view(&self, slug: &str, viewer: Option<&Actor>)
    -> Result<ProgramDetail, ProgramError>;

    /// Looks up a program for its edit form.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Forbidden`] unless `actor` owns it.
    async fn find_for_edit(&self, actor: &Actor, slug: &str) -> Result<Program, ProgramError>;

    /// Applies `input` to the program at `slug`. The ownership check runs
    /// before anything is written.
    async fn edit(
        &self,
        actor: &Actor,
        slug: &str,
        input: ProgramInput,
    ) -> Result<Program, ProgramError>;

    async fn find_by_id(&self, id: i32) -> Result<Program, ProgramError>;

    /// Deletes the program with its seasons, episodes, comments and favorites.
    async fn delete(&self, id: i32) -> Result<(), ProgramError>;

    /// Adds or removes the program from the actor's favorites and returns
    /// whether it is a favorite afterwards.
    async fn toggle_favorite(&self, actor: &Actor, slug: &str) -> Result<bool, ProgramError>;
}
