//! `SeaORM` implementation of the `ProgramService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::{Actor, slugify};
use crate::forms::FieldErrors;
use crate::models::program::{Program, ProgramDetail, ProgramInput, SeasonWithEpisodes};
use crate::services::notifier::{Notification, Notifier};
use crate::services::program_service::{ProgramError, ProgramService};

pub struct SeaOrmProgramService {
    store: Store,
    notifier: Arc<Notifier>,
}

impl SeaOrmProgramService {
    #[must_use]
    pub const fn new(store: Store, notifier: Arc<Notifier>) -> Self {
        Self { store, notifier }
    }

    async fn by_slug(&self, slug: &str) -> Result<Program, ProgramError> {
        self.store
            .get_program_by_slug(slug)
            .await?
            .ok_or_else(|| ProgramError::NotFound(slug.to_string()))
    }

    async fn owned_by_slug(&self, actor: &Actor, slug: &str) -> Result<Program, ProgramError> {
        let program = self.by_slug(slug).await?;
        if !program.is_owned_by(actor.id) {
            tracing::warn!(
                program_id = program.id,
                actor_id = actor.id,
                "Edit refused: actor is not the owner"
            );
            return Err(ProgramError::Forbidden);
        }
        Ok(program)
    }

    /// Derives the slug for `title`, rejecting it when another program has it.
    async fn free_slug(&self, title: &str, except_id: Option<i32>) -> Result<String, ProgramError> {
        let slug = slugify(title);
        if self.store.program_slug_taken(&slug, except_id).await? {
            return Err(ProgramError::Invalid(FieldErrors::single(
                "title",
                "A program with this title already exists.",
            )));
        }
        Ok(slug)
    }
}

#[async_trait]
impl ProgramService for SeaOrmProgramService {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Program>, ProgramError> {
        let programs = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => self.store.search_programs(term).await?,
            None => self.store.list_programs().await?,
        };
        Ok(programs)
    }

    async fn create(&self, actor: &Actor, input: ProgramInput) -> Result<Program, ProgramError> {
        let slug = self.free_slug(&input.title, None).await?;
        let program = self.store.insert_program(&input, &slug, actor.id).await?;

        info!(
            event = "program_created",
            program_id = program.id,
            slug = %program.slug,
            owner_id = actor.id,
            "Program created"
        );
        metrics::counter!("programs_created_total").increment(1);

        self.notifier
            .notify(Notification::NewProgram(&program))
            .await?;

        Ok(program)
    }

    async fn view(
        &self,
        slug: &str,
        viewer: Option<&Actor>,
    ) -> Result<ProgramDetail, ProgramError> {
        let program = self.by_slug(slug).await?;

        let owner_email = match program.owner_id {
            Some(owner_id) => self.store.get_user(owner_id).await?.map(|u| u.email),
            None => None,
        };

        let seasons = self.store.list_seasons_for_program(program.id).await?;
        let mut episodes = self.store.list_episodes_for_program(program.id).await?;

        let seasons: Vec<SeasonWithEpisodes> = seasons
            .into_iter()
            .map(|season| {
                let (own, rest): (Vec<_>, Vec<_>) = episodes
                    .drain(..)
                    .partition(|e| e.season_id == Some(season.id));
                episodes = rest;
                SeasonWithEpisodes {
                    season,
                    episodes: own,
                }
            })
            .collect();

        let favorite_count = self.store.count_favorites(program.id).await?;
        let is_favorite = match viewer {
            Some(actor) => self.store.is_favorite(actor.id, program.id).await?,
            None => false,
        };

        Ok(ProgramDetail {
            program,
            owner_email,
            seasons,
            loose_episodes: episodes,
            favorite_count,
            is_favorite,
        })
    }

    async fn find_for_edit(&self, actor: &Actor, slug: &str) -> Result<Program, ProgramError> {
        self.owned_by_slug(actor, slug).await
    }

    async fn edit(
        &self,
        actor: &Actor,
        slug: &str,
        input: ProgramInput,
    ) -> Result<Program, ProgramError> {
        let program = self.owned_by_slug(actor, slug).await?;
        let new_slug = self.free_slug(&input.title, Some(program.id)).await?;
        let updated = self
            .store
            .update_program(program.id, &input, &new_slug)
            .await?;

        info!(
            event = "program_updated",
            program_id = updated.id,
            slug = %updated.slug,
            "Program updated"
        );
        Ok(updated)
    }

    async fn find_by_id(&self, id: i32) -> Result<Program, ProgramError> {
        self.store
            .get_program(id)
            .await?
            .ok_or_else(|| ProgramError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: i32) -> Result<(), ProgramError> {
        if !self.store.delete_program(id).await? {
            return Err(ProgramError::NotFound(id.to_string()));
        }
        info!(event = "program_deleted", program_id = id, "Program deleted");
        Ok(())
    }

    async fn toggle_favorite(&self, actor: &Actor, slug: &str) -> Result<bool, ProgramError> {
        let program = self.by_slug(slug).await?;
        if self.store.is_favorite(actor.id, program.id).await? {
            self.store.remove_favorite(actor.id, program.id).await?;
            Ok(false)
        } else {
            self.store.add_favorite(actor.id, program.id).await?;
            Ok(true)
        }
    }
}
