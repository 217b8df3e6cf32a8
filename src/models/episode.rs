use crate::entities::{comments, episodes};

use super::program::{Program, Season};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: i32,
    pub program_id: i32,
    pub season_id: Option<i32>,
    pub number: i32,
    pub title: String,
    pub slug: String,
    pub synopsis: String,
}

impl From<episodes::Model> for Episode {
    fn from(model: episodes::Model) -> Self {
        Self {
            id: model.id,
            program_id: model.program_id,
            season_id: model.season_id,
            number: model.number,
            title: model.title,
            slug: model.slug,
            synopsis: model.synopsis,
        }
    }
}

/// Validated episode fields, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeInput {
    pub program_id: i32,
    pub season_id: Option<i32>,
    pub number: i32,
    pub title: String,
    pub synopsis: String,
}

/// Episode row for the index page.
#[derive(Debug, Clone)]
pub struct EpisodeListItem {
    pub episode: Episode,
    pub program_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i32,
    pub episode_id: i32,
    pub author_id: i32,
    pub author_email: String,
    pub body: String,
    pub created_at: String,
}

impl Comment {
    pub(crate) fn from_model(model: comments::Model, author_email: String) -> Self {
        Self {
            id: model.id,
            episode_id: model.episode_id,
            author_id: model.author_id,
            author_email,
            body: model.body,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EpisodeDetail {
    pub episode: Episode,
    pub program: Program,
    pub season: Option<Season>,
    pub comments: Vec<Comment>,
}
