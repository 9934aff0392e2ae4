use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::entitlements::UsageRepo,
    domain::entities::usage::{BillingMonth, UsageCounter},
};

#[async_trait]
impl UsageRepo for PostgresPersistence {
    async fn get(&self, user_id: Uuid, month: &BillingMonth) -> AppResult<Option<UsageCounter>> {
        let row = sqlx::query_as::<_, UsageCounter>(
            r#"
            SELECT user_id, year_month, cases_created
            FROM usage_counters
            WHERE user_id = $1 AND year_month = $2
            "#,
        )
        .bind(user_id)
        .bind(month.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row)
    }

    async fn try_reserve_case_slot(
        &self,
        user_id: Uuid,
        month: &BillingMonth,
        ceiling: Option<i32>,
    ) -> AppResult<Option<i32>> {
        // Nothing to reserve when the allowance is zero; the conditional
        // upsert below can only enforce the ceiling on existing rows.
        if matches!(ceiling, Some(c) if c <= 0) {
            return Ok(None);
        }

        // Single conditional statement: the row is inserted at 1, or
        // incremented only while still under the ceiling. Concurrent callers
        // serialize on the row lock, so at most one wins the last slot.
        let row = sqlx::query(
            r#"
            INSERT INTO usage_counters (user_id, year_month, cases_created)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id, year_month) DO UPDATE
            SET cases_created = usage_counters.cases_created + 1
            WHERE $3::int IS NULL OR usage_counters.cases_created < $3
            RETURNING cases_created
            "#,
        )
        .bind(user_id)
        .bind(month.as_str())
        .bind(ceiling)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(|r| r.get::<i32, _>("cases_created")))
    }

    async fn release_case_slot(&self, user_id: Uuid, month: &BillingMonth) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE usage_counters
            SET cases_created = GREATEST(cases_created - 1, 0)
            WHERE user_id = $1 AND year_month = $2
            "#,
        )
        .bind(user_id)
        .bind(month.as_str())
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(())
    }
}
