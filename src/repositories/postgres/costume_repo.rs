use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Costume, NewCostume};
use crate::repositories::traits::CostumeRepository;

#[derive(Clone)]
pub struct PgCostumeRepository {
    pool: AsyncDbPool,
}

impl PgCostumeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CostumeRepository for PgCostumeRepository {
    async fn create(&self, new_costume: NewCostume) -> Result<Costume, AppError> {
        use crate::schema::costumes::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(costumes)
            .values(&new_costume)
            .returning(Costume::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, costume_id: Uuid) -> Result<Option<Costume>, AppError> {
        use crate::schema::costumes::dsl::*;
        let mut conn = self.pool.get().await?;

        costumes
            .filter(id.eq(costume_id))
            .select(Costume::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> Result<Vec<Costume>, AppError> {
        use crate::schema::costumes::dsl::*;
        let mut conn = self.pool.get().await?;

        costumes
            .order((costume_name.asc(), id.asc()))
            .select(Costume::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
