use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{episodes, prelude::*, programs};
use crate::models::episode::{Episode, EpisodeInput, EpisodeListItem};

pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_with_program(&self) -> Result<Vec<EpisodeListItem>> {
        let rows = Episodes::find()
            .find_also_related(Programs)
            .order_by_asc(programs::Column::Title)
            .order_by_asc(episodes::Column::Number)
            .order_by_asc(episodes::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list episodes")?;

        Ok(rows
            .into_iter()
            .map(|(episode, program)| EpisodeListItem {
                episode: Episode::from(episode),
                program_title: program.map(|p| p.title).unwrap_or_default(),
            })
            .collect())
    }

    pub async fn list_for_program(&self, program_id: i32) -> Result<Vec<Episode>> {
        let rows = Episodes::find()
            .filter(episodes::Column::ProgramId.eq(program_id))
            .order_by_asc(episodes::Column::Number)
            .order_by_asc(episodes::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list episodes for program")?;

        Ok(rows.into_iter().map(Episode::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Episode>> {
        let row = Episodes::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query episode by ID")?;

        Ok(row.map(Episode::from))
    }

    /// Episode slugs are not unique; the oldest episode wins.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Episode>> {
        let row = Episodes::find()
            .filter(episodes::Column::Slug.eq(slug))
            .order_by_asc(episodes::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query episode by slug")?;

        Ok(row.map(Episode::from))
    }

    pub async fn insert(&self, input: &EpisodeInput, slug: &str) -> Result<Episode> {
        let active = episodes::ActiveModel {
            program_id: Set(input.program_id),
            season_id: Set(input.season_id),
            number: Set(input.number),
            title: Set(input.title.clone()),
            slug: Set(slug.to_string()),
            synopsis: Set(input.synopsis.clone()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert episode")?;

        Ok(Episode::from(model))
    }

    pub async fn update(&self, id: i32, input: &EpisodeInput, slug: &str) -> Result<Episode> {
        let model = Episodes::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query episode for update")?
            .ok_or_else(|| anyhow::anyhow!("Episode not found: {id}"))?;

        let mut active: episodes::ActiveModel = model.into();
        active.program_id = Set(input.program_id);
        active.season_id = Set(input.season_id);
        active.number = Set(input.number);
        active.title = Set(input.title.clone());
        active.slug = Set(slug.to_string());
        active.synopsis = Set(input.synopsis.clone());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update episode")?;

        Ok(Episode::from(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Episodes::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete episode")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Episodes::find()
            .count(&self.conn)
            .await
            .context("Failed to count episodes")
    }
}
