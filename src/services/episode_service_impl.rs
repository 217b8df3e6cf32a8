//! `SeaORM` implementation of the `EpisodeService` trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::{Actor, slugify};
use crate::forms::FieldErrors;
use crate::models::episode::{Comment, Episode, EpisodeDetail, EpisodeInput, EpisodeListItem};
use crate::models::program::{Program, Season};
use crate::services::episode_service::{EpisodeError, EpisodeService, ProgramChoice};
use crate::services::notifier::{Notification, Notifier};

pub struct SeaOrmEpisodeService {
    store: Store,
    notifier: Arc<Notifier>,
}

impl SeaOrmEpisodeService {
    #[must_use]
    pub const fn new(store: Store, notifier: Arc<Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Checks the program and season references against the database.
    async fn resolve_parents(
        &self,
        input: &EpisodeInput,
    ) -> Result<(Program, Option<Season>), EpisodeError> {
        let Some(program) = self.store.get_program(input.program_id).await? else {
            return Err(EpisodeError::Invalid(FieldErrors::single(
                "program",
                "Please select a program.",
            )));
        };

        let season = match input.season_id {
            Some(season_id) => match self.store.get_season(season_id).await? {
                Some(season) if season.program_id == program.id => Some(season),
                _ => {
                    return Err(EpisodeError::Invalid(FieldErrors::single(
                        "season",
                        "This season does not belong to the selected program.",
                    )));
                }
            },
            None => None,
        };

        Ok((program, season))
    }
}

#[async_trait]
impl EpisodeService for SeaOrmEpisodeService {
    async fn list(&self) -> Result<Vec<EpisodeListItem>, EpisodeError> {
        Ok(self.store.list_episodes().await?)
    }

    async fn choices(&self) -> Result<Vec<ProgramChoice>, EpisodeError> {
        let programs = self.store.list_programs().await?;

        let mut seasons_by_program: HashMap<i32, Vec<Season>> = HashMap::new();
        for season in self.store.list_seasons().await? {
            seasons_by_program
                .entry(season.program_id)
                .or_default()
                .push(season);
        }

        Ok(programs
            .into_iter()
            .map(|program| ProgramChoice {
                seasons: seasons_by_program.remove(&program.id).unwrap_or_default(),
                program,
            })
            .collect())
    }

    async fn create(&self, input: EpisodeInput) -> Result<Episode, EpisodeError> {
        let (program, _) = self.resolve_parents(&input).await?;
        let slug = slugify(&input.title);
        let episode = self.store.insert_episode(&input, &slug).await?;

        info!(
            event = "episode_created",
            episode_id = episode.id,
            program_id = program.id,
            slug = %episode.slug,
            "Episode created"
        );
        metrics::counter!("episodes_created_total").increment(1);

        self.notifier
            .notify(Notification::NewEpisode {
                episode: &episode,
                program: &program,
            })
            .await?;

        Ok(episode)
    }

    async fn view(&self, slug: &str) -> Result<EpisodeDetail, EpisodeError> {
        let episode = self.find_by_slug(slug).await?;

        let program = self
            .store
            .get_program(episode.program_id)
            .await?
            .ok_or_else(|| EpisodeError::Internal(format!("Episode {} has no program", episode.id)))?;

        let season = match episode.season_id {
            Some(id) => self.store.get_season(id).await?,
            None => None,
        };

        let comments = self.store.list_comments(episode.id).await?;

        Ok(EpisodeDetail {
            episode,
            program,
            season,
            comments,
        })
    }

    async fn add_comment(
        &self,
        actor: &Actor,
        slug: &str,
        body: String,
    ) -> Result<Comment, EpisodeError> {
        let episode = self.find_by_slug(slug).await?;
        let comment = self
            .store
            .insert_comment(episode.id, actor.id, &body)
            .await?;

        info!(
            event = "comment_created",
            comment_id = comment.id,
            episode_id = episode.id,
            author_id = actor.id,
            "Comment added"
        );
        Ok(comment)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Episode, EpisodeError> {
        self.store
            .get_episode_by_slug(slug)
            .await?
            .ok_or_else(|| EpisodeError::NotFound(slug.to_string()))
    }

    async fn edit(&self, slug: &str, input: EpisodeInput) -> Result<Episode, EpisodeError> {
        let episode = self.find_by_slug(slug).await?;
        self.resolve_parents(&input).await?;

        let new_slug = slugify(&input.title);
        let updated = self
            .store
            .update_episode(episode.id, &input, &new_slug)
            .await?;

        info!(
            event = "episode_updated",
            episode_id = updated.id,
            slug = %updated.slug,
            "Episode updated"
        );
        Ok(updated)
    }

    async fn find_by_id(&self, id: i32) -> Result<Episode, EpisodeError> {
        self.store
            .get_episode(id)
            .await?
            .ok_or_else(|| EpisodeError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: i32) -> Result<(), EpisodeError> {
        if !self.store.delete_episode(id).await? {
            return Err(EpisodeError::NotFound(id.to_string()));
        }
        info!(event = "episode_deleted", episode_id = id, "Episode deleted");
        Ok(())
    }
}
