use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{comments, prelude::*};
use crate::models::episode::Comment;

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Oldest first, with the author's email.
    pub async fn list_for_episode(&self, episode_id: i32) -> Result<Vec<Comment>> {
        let rows = Comments::find()
            .filter(comments::Column::EpisodeId.eq(episode_id))
            .find_also_related(Users)
            .order_by_asc(comments::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list comments")?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| {
                Comment::from_model(comment, author.map(|a| a.email).unwrap_or_default())
            })
            .collect())
    }

    pub async fn insert(&self, episode_id: i32, author_id: i32, body: &str) -> Result<Comment> {
        let active = comments::ActiveModel {
            episode_id: Set(episode_id),
            author_id: Set(author_id),
            body: Set(body.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert comment")?;

        let author_email = Users::find_by_id(author_id)
            .one(&self.conn)
            .await
            .context("Failed to query comment author")?
            .map(|u| u.email)
            .unwrap_or_default();

        Ok(Comment::from_model(model, author_email))
    }

    pub async fn count_for_episode(&self, episode_id: i32) -> Result<u64> {
        Comments::find()
            .filter(comments::Column::EpisodeId.eq(episode_id))
            .count(&self.conn)
            .await
            .context("Failed to count comments")
    }
}
