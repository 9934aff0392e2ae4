use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::cases::CaseRepo,
    domain::entities::case::CaseRecord,
};

#[async_trait]
impl CaseRepo for PostgresPersistence {
    async fn create(&self, user_id: Uuid, title: &str) -> AppResult<CaseRecord> {
        let case = sqlx::query_as::<_, CaseRecord>(
            r#"
            INSERT INTO cases (id, user_id, title, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, user_id, title, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(case)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<CaseRecord>> {
        let cases = sqlx::query_as::<_, CaseRecord>(
            r#"
            SELECT id, user_id, title, created_at
            FROM cases
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(cases)
    }
}
