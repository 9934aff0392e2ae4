use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Canceled,
    Trialing,
    Incomplete,
    Unpaid,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::Unpaid => "unpaid",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "active" => SubscriptionStatus::Active,
            "past_due" => SubscriptionStatus::PastDue,
            "canceled" | "cancelled" => SubscriptionStatus::Canceled,
            "trialing" => SubscriptionStatus::Trialing,
            "unpaid" => SubscriptionStatus::Unpaid,
            _ => SubscriptionStatus::Incomplete,
        }
    }

    /// Only a fully active subscription grants a paid plan. Past-due and
    /// trialing states do not upgrade the entitlement.
    pub fn grants_paid_plan(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

/// Mirror of billing-provider truth, one row per user. Written by the
/// billing-webhook ingester; this service only reads it.
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionState {
    pub user_id: Uuid,
    /// Raw plan key from the billing mirror; normalized on read.
    pub plan_key: String,
    pub status: String,
    pub stripe_customer_id: String,
    pub updated_at: Option<NaiveDateTime>,
}

impl SubscriptionState {
    pub fn status(&self) -> SubscriptionStatus {
        SubscriptionStatus::from_str(&self.status)
    }
}
