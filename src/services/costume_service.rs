//! Costume catalogue.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Costume, NewCostume};
use crate::repositories::CostumeRepository;

#[derive(Clone)]
pub struct CostumeService {
    repo: Arc<dyn CostumeRepository>,
}

impl CostumeService {
    pub fn new(repo: Arc<dyn CostumeRepository>) -> Self {
        Self { repo }
    }

    /// Every costume, ordered by name.
    pub async fn list_costumes(&self) -> AppResult<Vec<Costume>> {
        self.repo.list_all().await
    }

    /// Gets a costume by id, or `NotFound`.
    pub async fn get_costume(&self, id: Uuid) -> AppResult<Costume> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("costume", "costumeId", id))
    }

    /// Lists a new costume. The owner is whatever `user_id` the caller set.
    pub async fn create_costume(&self, new_costume: NewCostume) -> AppResult<Costume> {
        let costume = self.repo.create(new_costume).await?;
        tracing::info!(
            costume_id = %costume.id,
            owner = %costume.user_id,
            "Costume listed"
        );
        Ok(costume)
    }
}
