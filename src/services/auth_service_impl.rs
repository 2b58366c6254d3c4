//! `SeaORM` implementation of the `AuthService` trait.

use crate::db::Store;
use crate::models::user::{User, is_valid_display_name};
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        self.store
            .verify_credentials(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn current_user(&self, id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user(id).await?)
    }

    async fn owner(&self) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_owner().await?)
    }

    async fn update_name(&self, id: i32, name: &str) -> Result<User, AuthError> {
        if !is_valid_display_name(name) {
            return Err(AuthError::Validation(
                "Name must be between 1 and 20 characters".to_string(),
            ));
        }

        self.store
            .update_user_name(id, name)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
