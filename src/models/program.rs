use crate::entities::{programs, seasons};

use super::episode::Episode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub synopsis: String,
    pub poster: Option<String>,
    pub country: Option<String>,
    pub year: Option<i32>,
    pub owner_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl Program {
    #[must_use]
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.owner_id == Some(user_id)
    }
}

impl From<programs::Model> for Program {
    fn from(model: programs::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            synopsis: model.synopsis,
            poster: model.poster,
            country: model.country,
            year: model.year,
            owner_id: model.owner_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Validated program fields, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInput {
    pub title: String,
    pub synopsis: String,
    pub poster: Option<String>,
    pub country: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    pub id: i32,
    pub program_id: i32,
    pub number: i32,
    pub year: Option<i32>,
    pub description: String,
}

impl From<seasons::Model> for Season {
    fn from(model: seasons::Model) -> Self {
        Self {
            id: model.id,
            program_id: model.program_id,
            number: model.number,
            year: model.year,
            description: model.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeasonWithEpisodes {
    pub season: Season,
    pub episodes: Vec<Episode>,
}

/// Everything the program page shows.
#[derive(Debug, Clone)]
pub struct ProgramDetail {
    pub program: Program,
    pub owner_email: Option<String>,
    pub seasons: Vec<SeasonWithEpisodes>,
    /// Episodes attached to the program but to no season.
    pub loose_episodes: Vec<Episode>,
    pub favorite_count: u64,
    pub is_favorite: bool,
}
