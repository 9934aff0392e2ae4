use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Admin-assigned plan override. Takes precedence over billing-derived state
/// while `is_active` is true. Revocation deactivates the row rather than
/// deleting it, so the audit trail survives.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlanOverride {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Raw plan key as written by the admin console; normalized on read.
    pub plan: String,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
