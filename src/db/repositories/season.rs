use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{prelude::*, seasons};
use crate::models::program::Season;

pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Season>> {
        let rows = Seasons::find()
            .order_by_asc(seasons::Column::ProgramId)
            .order_by_asc(seasons::Column::Number)
            .all(&self.conn)
            .await
            .context("Failed to list seasons")?;

        Ok(rows.into_iter().map(Season::from).collect())
    }

    pub async fn list_for_program(&self, program_id: i32) -> Result<Vec<Season>> {
        let rows = Seasons::find()
            .filter(seasons::Column::ProgramId.eq(program_id))
            .order_by_asc(seasons::Column::Number)
            .order_by_asc(seasons::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list seasons for program")?;

        Ok(rows.into_iter().map(Season::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Season>> {
        let row = Seasons::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query season by ID")?;

        Ok(row.map(Season::from))
    }

    pub async fn insert(
        &self,
        program_id: i32,
        number: i32,
        year: Option<i32>,
        description: &str,
    ) -> Result<Season> {
        let active = seasons::ActiveModel {
            program_id: Set(program_id),
            number: Set(number),
            year: Set(year),
            description: Set(description.to_string()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert season")?;

        Ok(Season::from(model))
    }
}
