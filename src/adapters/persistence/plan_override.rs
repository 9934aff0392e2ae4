use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::entitlements::PlanOverrideRepo,
    domain::entities::plan_override::PlanOverride,
};

const SELECT_COLS: &str = "id, user_id, plan, is_active, created_by, created_at, updated_at";

#[async_trait]
impl PlanOverrideRepo for PostgresPersistence {
    async fn get_active(&self, user_id: Uuid) -> AppResult<Option<PlanOverride>> {
        let row = sqlx::query_as::<_, PlanOverride>(&format!(
            "SELECT {SELECT_COLS} FROM plan_overrides WHERE user_id = $1 AND is_active = TRUE"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row)
    }

    async fn get_latest(&self, user_id: Uuid) -> AppResult<Option<PlanOverride>> {
        let row = sqlx::query_as::<_, PlanOverride>(&format!(
            "SELECT {SELECT_COLS} FROM plan_overrides WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row)
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        plan: &str,
        is_active: bool,
        created_by: Uuid,
    ) -> AppResult<PlanOverride> {
        let row = sqlx::query_as::<_, PlanOverride>(&format!(
            r#"
            INSERT INTO plan_overrides (id, user_id, plan, is_active, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                plan = EXCLUDED.plan,
                is_active = EXCLUDED.is_active,
                created_by = EXCLUDED.created_by,
                updated_at = NOW()
            RETURNING {SELECT_COLS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(plan)
        .bind(is_active)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row)
    }

    async fn deactivate(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE plan_overrides SET is_active = FALSE, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
