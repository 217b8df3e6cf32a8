use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{prelude::*, programs, user_programs};
use crate::models::program::{Program, ProgramInput};

pub struct ProgramRepository {
    conn: DatabaseConnection,
}

/// Unicode-aware "contains", ignoring case. SQLite's `LOWER()` only folds
/// ASCII, so the comparison happens here instead of in SQL.
fn title_matches(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}

impl ProgramRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Program>> {
        let rows = Programs::find()
            .order_by_asc(programs::Column::Title)
            .order_by_asc(programs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list programs")?;

        Ok(rows.into_iter().map(Program::from).collect())
    }

    /// Case-insensitive "title contains" search, ordered like [`Self::list_all`].
    pub async fn search_by_title(&self, term: &str) -> Result<Vec<Program>> {
        let needle = term.to_lowercase();
        let mut programs = self.list_all().await?;
        programs.retain(|p| title_matches(&p.title, &needle));
        Ok(programs)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Program>> {
        let row = Programs::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query program by ID")?;

        Ok(row.map(Program::from))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Program>> {
        let row = Programs::find()
            .filter(programs::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query program by slug")?;

        Ok(row.map(Program::from))
    }

    pub async fn slug_taken(&self, slug: &str, except_id: Option<i32>) -> Result<bool> {
        let mut query = Programs::find().filter(programs::Column::Slug.eq(slug));
        if let Some(id) = except_id {
            query = query.filter(programs::Column::Id.ne(id));
        }
        let count = query
            .count(&self.conn)
            .await
            .context("Failed to check program slug")?;

        Ok(count > 0)
    }

    pub async fn insert(&self, input: &ProgramInput, slug: &str, owner_id: i32) -> Result<Program> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = programs::ActiveModel {
            title: Set(input.title.clone()),
            slug: Set(slug.to_string()),
            synopsis: Set(input.synopsis.clone()),
            poster: Set(input.poster.clone()),
            country: Set(input.country.clone()),
            year: Set(input.year),
            owner_id: Set(Some(owner_id)),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert program")?;

        info!("Created program {} ({})", model.title, model.slug);
        Ok(Program::from(model))
    }

    pub async fn update(&self, id: i32, input: &ProgramInput, slug: &str) -> Result<Program> {
        let model = Programs::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query program for update")?
            .ok_or_else(|| anyhow::anyhow!("Program not found: {id}"))?;

        let mut active: programs::ActiveModel = model.into();
        active.title = Set(input.title.clone());
        active.slug = Set(slug.to_string());
        active.synopsis = Set(input.synopsis.clone());
        active.poster = Set(input.poster.clone());
        active.country = Set(input.country.clone());
        active.year = Set(input.year);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update program")?;

        Ok(Program::from(model))
    }

    /// Seasons, episodes, comments and favorites go with it through
    /// `ON DELETE CASCADE`.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Programs::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete program")?;

        if result.rows_affected > 0 {
            info!("Deleted program {id}");
        }
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Programs::find()
            .count(&self.conn)
            .await
            .context("Failed to count programs")
    }

    pub async fn is_favorite(&self, user_id: i32, program_id: i32) -> Result<bool> {
        let row = UserPrograms::find_by_id((user_id, program_id))
            .one(&self.conn)
            .await
            .context("Failed to query favorite")?;

        Ok(row.is_some())
    }

    pub async fn add_favorite(&self, user_id: i32, program_id: i32) -> Result<()> {
        let active = user_programs::ActiveModel {
            user_id: Set(user_id),
            program_id: Set(program_id),
        };

        UserPrograms::insert(active)
            .on_conflict(
                OnConflict::columns([
                    user_programs::Column::UserId,
                    user_programs::Column::ProgramId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(&self.conn)
            .await
            .context("Failed to add favorite")?;

        Ok(())
    }

    pub async fn remove_favorite(&self, user_id: i32, program_id: i32) -> Result<()> {
        UserPrograms::delete_by_id((user_id, program_id))
            .exec(&self.conn)
            .await
            .context("Failed to remove favorite")?;

        Ok(())
    }

    pub async fn count_favorites(&self, program_id: i32) -> Result<u64> {
        UserPrograms::find()
            .filter(user_programs::Column::ProgramId.eq(program_id))
            .count(&self.conn)
            .await
            .context("Failed to count favorites")
    }

    pub async fn favorites_of(&self, user_id: i32) -> Result<Vec<Program>> {
        let Some(user) = Users::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("Failed to query user for favorites")?
        else {
            return Ok(Vec::new());
        };

        let rows = user
            .find_related(Programs)
            .order_by_asc(programs::Column::Title)
            .all(&self.conn)
            .await
            .context("Failed to list favorites")?;

        Ok(rows.into_iter().map(Program::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::title_matches;

    #[test]
    fn test_title_matches_folds_unicode_case() {
        assert!(title_matches("The Walking Dead", "walk"));
        assert!(title_matches("Élite", "élite"));
        assert!(title_matches("LA CASA DE PAPEL", "casa de"));
        assert!(title_matches("100% Hotel", "100%"));
        assert!(!title_matches("Dark", "walk"));
        assert!(!title_matches("Élite", "elite"));
    }
}
