use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::entitlements::SubscriptionRepo,
    domain::entities::subscription::SubscriptionState,
};

// Read-only mirror of billing-provider state; rows are written by the
// webhook ingester, never from here.
#[async_trait]
impl SubscriptionRepo for PostgresPersistence {
    async fn get_for_user(&self, user_id: Uuid) -> AppResult<Option<SubscriptionState>> {
        let row = sqlx::query_as::<_, SubscriptionState>(
            r#"
            SELECT user_id, plan_key, status, stripe_customer_id, updated_at
            FROM subscriptions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row)
    }
}
