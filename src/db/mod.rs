use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::{Config, SecurityConfig};
use crate::models::movie::Movie;
use crate::models::user::User;

pub mod migrator;
pub mod repositories;

pub use repositories::user::CredentialsOutcome;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let store = Self::connect(db_url, max_connections, min_connections).await?;
        store.migrate().await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(store)
    }

    /// Open the pool without touching the schema
    pub async fn connect(db_url: &str, max_connections: u32, min_connections: u32) -> Result<Self> {
        let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
        if !path_str.starts_with(":memory:") {
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
            tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path_str)
                .await
                .with_context(|| format!("Failed to create database file: {path_str}"))?;
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

        Ok(Self { conn })
    }

    pub async fn migrate(&self) -> Result<()> {
        migrator::Migrator::up(&self.conn, None).await?;
        Ok(())
    }

    /// Drop every table and recreate the schema
    pub async fn reset(&self) -> Result<()> {
        migrator::Migrator::fresh(&self.conn).await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    pub async fn get_owner(&self) -> Result<Option<User>> {
        self.user_repo().first().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo()
            .verify_credentials(username, password)
            .await
    }

    pub async fn update_user_name(&self, id: i32, name: &str) -> Result<Option<User>> {
        self.user_repo().update_name(id, name).await
    }

    pub async fn set_owner_name(&self, name: &str) -> Result<User> {
        self.user_repo().set_owner_name(name).await
    }

    pub async fn upsert_owner_credentials(
        &self,
        username: &str,
        password: &str,
        default_name: &str,
        config: &SecurityConfig,
    ) -> Result<CredentialsOutcome> {
        self.user_repo()
            .upsert_credentials(username, password, default_name, config)
            .await
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list().await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn add_movie(&self, title: &str, year: &str) -> Result<Movie> {
        self.movie_repo().add(title, year).await
    }

    pub async fn add_movies(&self, entries: &[(&str, &str)]) -> Result<u64> {
        self.movie_repo().add_many(entries).await
    }

    pub async fn update_movie(&self, id: i32, title: &str, year: &str) -> Result<Option<Movie>> {
        self.movie_repo().update(id, title, year).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<bool> {
        self.movie_repo().delete(id).await
    }

    pub async fn count_movies(&self) -> Result<u64> {
        self.movie_repo().count().await
    }
}
