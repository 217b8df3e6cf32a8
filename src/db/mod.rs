use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::{GeneralConfig, SecurityConfig};
use crate::models::episode::{Comment, Episode, EpisodeInput, EpisodeListItem};
use crate::models::program::{Program, ProgramInput, Season};
use crate::models::user::User;

pub mod fixtures;
pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Connects with the database URL and pool bounds from `[general]`.
    pub async fn open(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn program_repo(&self) -> repositories::program::ProgramRepository {
        repositories::program::ProgramRepository::new(self.conn.clone())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    // Users

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo().create(email, password, security).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    // Programs

    pub async fn list_programs(&self) -> Result<Vec<Program>> {
        self.program_repo().list_all().await
    }

    pub async fn search_programs(&self, term: &str) -> Result<Vec<Program>> {
        self.program_repo().search_by_title(term).await
    }

    pub async fn get_program(&self, id: i32) -> Result<Option<Program>> {
        self.program_repo().get(id).await
    }

    pub async fn get_program_by_slug(&self, slug: &str) -> Result<Option<Program>> {
        self.program_repo().get_by_slug(slug).await
    }

    pub async fn program_slug_taken(&self, slug: &str, except_id: Option<i32>) -> Result<bool> {
        self.program_repo().slug_taken(slug, except_id).await
    }

    pub async fn insert_program(
        &self,
        input: &ProgramInput,
        slug: &str,
        owner_id: i32,
    ) -> Result<Program> {
        self.program_repo().insert(input, slug, owner_id).await
    }

    pub async fn update_program(
        &self,
        id: i32,
        input: &ProgramInput,
        slug: &str,
    ) -> Result<Program> {
        self.program_repo().update(id, input, slug).await
    }

    pub async fn delete_program(&self, id: i32) -> Result<bool> {
        self.program_repo().delete(id).await
    }

    pub async fn count_programs(&self) -> Result<u64> {
        self.program_repo().count().await
    }

    // Favorites

    pub async fn is_favorite(&self, user_id: i32, program_id: i32) -> Result<bool> {
        self.program_repo().is_favorite(user_id, program_id).await
    }

    pub async fn add_favorite(&self, user_id: i32, program_id: i32) -> Result<()> {
        self.program_repo().add_favorite(user_id, program_id).await
    }

    pub async fn remove_favorite(&self, user_id: i32, program_id: i32) -> Result<()> {
        self.program_repo().remove_favorite(user_id, program_id).await
    }

    pub async fn count_favorites(&self, program_id: i32) -> Result<u64> {
        self.program_repo().count_favorites(program_id).await
    }

    pub async fn list_favorites(&self, user_id: i32) -> Result<Vec<Program>> {
        self.program_repo().favorites_of(user_id).await
    }

    // Seasons

    pub async fn list_seasons(&self) -> Result<Vec<Season>> {
        self.season_repo().list_all().await
    }

    pub async fn list_seasons_for_program(&self, program_id: i32) -> Result<Vec<Season>> {
        self.season_repo().list_for_program(program_id).await
    }

    pub async fn get_season(&self, id: i32) -> Result<Option<Season>> {
        self.season_repo().get(id).await
    }

    pub async fn insert_season(
        &self,
        program_id: i32,
        number: i32,
        year: Option<i32>,
        description: &str,
    ) -> Result<Season> {
        self.season_repo()
            .insert(program_id, number, year, description)
            .await
    }

    // Episodes

    pub async fn list_episodes(&self) -> Result<Vec<EpisodeListItem>> {
        self.episode_repo().list_with_program().await
    }

    pub async fn list_episodes_for_program(&self, program_id: i32) -> Result<Vec<Episode>> {
        self.episode_repo().list_for_program(program_id).await
    }

    pub async fn get_episode(&self, id: i32) -> Result<Option<Episode>> {
        self.episode_repo().get(id).await
    }

    pub async fn get_episode_by_slug(&self, slug: &str) -> Result<Option<Episode>> {
        self.episode_repo().get_by_slug(slug).await
    }

    pub async fn insert_episode(&self, input: &EpisodeInput, slug: &str) -> Result<Episode> {
        self.episode_repo().insert(input, slug).await
    }

    pub async fn update_episode(
        &self,
        id: i32,
        input: &EpisodeInput,
        slug: &str,
    ) -> Result<Episode> {
        self.episode_repo().update(id, input, slug).await
    }

    pub async fn delete_episode(&self, id: i32) -> Result<bool> {
        self.episode_repo().delete(id).await
    }

    pub async fn count_episodes(&self) -> Result<u64> {
        self.episode_repo().count().await
    }

    // Comments

    pub async fn list_comments(&self, episode_id: i32) -> Result<Vec<Comment>> {
        self.comment_repo().list_for_episode(episode_id).await
    }

    pub async fn insert_comment(
        &self,
        episode_id: i32,
        author_id: i32,
        body: &str,
    ) -> Result<Comment> {
        self.comment_repo().insert(episode_id, author_id, body).await
    }

    pub async fn count_comments(&self, episode_id: i32) -> Result<u64> {
        self.comment_repo().count_for_episode(episode_id).await
    }
}
