use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::users;
use crate::models::user::User;

/// Whether `upsert_credentials` created the owner or updated the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsOutcome {
    Created,
    Updated,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// The watchlist owner: the first user row by id
    pub async fn first(&self) -> Result<Option<User>> {
        let user = self
            .first_model()
            .await
            .context("Failed to query the first user")?;

        Ok(user.map(User::from))
    }

    async fn first_model(&self) -> Result<Option<users::Model>, sea_orm::DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::Id)
            .one(&self.conn)
            .await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn count(&self) -> Result<u64> {
        users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }

    /// Check a login attempt against the owner account.
    /// Returns the owner when both the username and the password match.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        let owner = self
            .first_model()
            .await
            .context("Failed to query user for password verification")?;

        let Some(owner) = owner else {
            return Ok(None);
        };

        let (Some(stored_username), Some(password_hash)) =
            (owner.username.as_deref(), owner.password_hash.clone())
        else {
            return Ok(None);
        };

        if stored_username != username {
            return Ok(None);
        }

        let password = password.to_string();
        let is_valid = task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .context("Password verification task panicked")??;

        Ok(is_valid.then(|| User::from(owner)))
    }

    pub async fn update_name(&self, id: i32, name: &str) -> Result<Option<User>> {
        let Some(user) = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for name update")?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        let updated = active.update(&self.conn).await?;

        Ok(Some(User::from(updated)))
    }

    /// Set the display name of the owner, creating a credential-less owner
    /// when the table is empty.
    pub async fn set_owner_name(&self, name: &str) -> Result<User> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = match self.first_model().await? {
            Some(owner) => {
                let mut active: users::ActiveModel = owner.into();
                active.name = Set(name.to_string());
                active.updated_at = Set(now);
                active.update(&self.conn).await?
            }
            None => {
                users::ActiveModel {
                    name: Set(name.to_string()),
                    username: Set(None),
                    password_hash: Set(None),
                    created_at: Set(now.clone()),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.conn)
                .await?
            }
        };

        Ok(User::from(model))
    }

    /// Create the owner account, or replace the owner's username and password.
    pub async fn upsert_credentials(
        &self,
        username: &str,
        password: &str,
        default_name: &str,
        config: &SecurityConfig,
    ) -> Result<CredentialsOutcome> {
        let password = password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let now = chrono::Utc::now().to_rfc3339();

        if let Some(owner) = self.first_model().await? {
            let mut active: users::ActiveModel = owner.into();
            active.username = Set(Some(username.to_string()));
            active.password_hash = Set(Some(password_hash));
            active.updated_at = Set(now);
            active.update(&self.conn).await?;
            return Ok(CredentialsOutcome::Updated);
        }

        users::ActiveModel {
            name: Set(default_name.to_string()),
            username: Set(Some(username.to_string())),
            password_hash: Set(Some(password_hash)),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;

        Ok(CredentialsOutcome::Created)
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the crate's default params.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Verify a password against a PHC hash string. Params are read from the hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
