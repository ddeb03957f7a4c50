//! User service for registration and credential checks.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;
use crate::utils::password::{hash_password, verify_password};

/// User service for handling user-related business logic.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Registers a new user.
    ///
    /// The email is stored lowercased and the password as an Argon2id hash.
    /// A taken username or email yields `Duplicate`.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> AppResult<User> {
        let password = password.to_string();
        let password_hash = run_blocking(move || hash_password(&password)).await?;
        let new_user = NewUser::new(
            username.to_string(),
            email.trim().to_lowercase(),
            password_hash,
        );

        let user = self.repo.create(new_user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks an email/password pair.
    ///
    /// Unknown email and wrong password produce the same `Unauthorized` error.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let invalid = || AppError::unauthorized("Invalid credentials");

        let user = self
            .repo
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        let password = password.to_string();
        let password_hash = user.password_hash.clone();
        if !run_blocking(move || verify_password(&password, &password_hash)).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(invalid());
        }

        Ok(user)
    }

    /// Gets a user by their ID.
    ///
    /// # Returns
    /// The user if found, or `NotFound` error
    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "userId", id))
    }
}

/// Argon2 is CPU-bound; keep it off the async workers.
async fn run_blocking<T, F>(work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
}
