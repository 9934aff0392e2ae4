use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A legal-letter case opened by a user. Creation is the rate-limited action
/// counted against `maxCasesPerMonth`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: NaiveDateTime,
}
