//! Test data factories. Each creates a complete, valid object with sensible
//! defaults; use the closure parameter to override fields as needed.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domain::entities::{plan_override::PlanOverride, subscription::SubscriptionState};

pub fn test_datetime() -> NaiveDateTime {
    chrono::DateTime::from_timestamp(1_756_000_000, 0)
        .unwrap()
        .naive_utc()
}

/// Create an active admin override for the given user.
pub fn create_test_override(
    user_id: Uuid,
    overrides: impl FnOnce(&mut PlanOverride),
) -> PlanOverride {
    let mut row = PlanOverride {
        id: Uuid::new_v4(),
        user_id,
        plan: "pro".to_string(),
        is_active: true,
        created_by: Uuid::new_v4(),
        created_at: test_datetime(),
        updated_at: test_datetime(),
    };
    overrides(&mut row);
    row
}

/// Create an active paid subscription mirror row for the given user.
pub fn create_test_subscription(
    user_id: Uuid,
    overrides: impl FnOnce(&mut SubscriptionState),
) -> SubscriptionState {
    let mut row = SubscriptionState {
        user_id,
        plan_key: "plus".to_string(),
        status: "active".to_string(),
        stripe_customer_id: format!("cus_{}", &user_id.simple().to_string()[..12]),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut row);
    row
}
