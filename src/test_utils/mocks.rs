//! In-memory mock implementations of the repository traits.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{
        cases::CaseRepo,
        entitlements::{PlanOverrideRepo, SubscriptionRepo, UsageRepo},
    },
    domain::entities::{
        case::CaseRecord,
        plan_override::PlanOverride,
        subscription::SubscriptionState,
        usage::{BillingMonth, UsageCounter},
    },
};

fn unavailable() -> AppError {
    AppError::StoreUnavailable("simulated store outage".into())
}

// ============================================================================
// InMemoryPlanOverrideRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryPlanOverrideRepo {
    pub overrides: Mutex<HashMap<Uuid, PlanOverride>>,
}

impl InMemoryPlanOverrideRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: Vec<PlanOverride>) -> Self {
        let map = overrides.into_iter().map(|o| (o.user_id, o)).collect();
        Self {
            overrides: Mutex::new(map),
        }
    }
}

#[async_trait]
impl PlanOverrideRepo for InMemoryPlanOverrideRepo {
    async fn get_active(&self, user_id: Uuid) -> AppResult<Option<PlanOverride>> {
        Ok(self
            .overrides
            .lock()
            .unwrap()
            .get(&user_id)
            .filter(|o| o.is_active)
            .cloned())
    }

    async fn get_latest(&self, user_id: Uuid) -> AppResult<Option<PlanOverride>> {
        Ok(self.overrides.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        plan: &str,
        is_active: bool,
        created_by: Uuid,
    ) -> AppResult<PlanOverride> {
        let mut overrides = self.overrides.lock().unwrap();
        let now = Utc::now().naive_utc();
        let row = PlanOverride {
            id: overrides
                .get(&user_id)
                .map(|o| o.id)
                .unwrap_or_else(Uuid::new_v4),
            user_id,
            plan: plan.to_string(),
            is_active,
            created_by,
            created_at: overrides
                .get(&user_id)
                .map(|o| o.created_at)
                .unwrap_or(now),
            updated_at: now,
        };
        overrides.insert(user_id, row.clone());
        Ok(row)
    }

    async fn deactivate(&self, user_id: Uuid) -> AppResult<bool> {
        let mut overrides = self.overrides.lock().unwrap();
        match overrides.get_mut(&user_id) {
            Some(row) => {
                row.is_active = false;
                row.updated_at = Utc::now().naive_utc();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// InMemorySubscriptionRepo
// ============================================================================

#[derive(Default)]
pub struct InMemorySubscriptionRepo {
    pub subscriptions: Mutex<HashMap<Uuid, SubscriptionState>>,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: Vec<SubscriptionState>) -> Self {
        let map = subscriptions.into_iter().map(|s| (s.user_id, s)).collect();
        Self {
            subscriptions: Mutex::new(map),
        }
    }
}

#[async_trait]
impl SubscriptionRepo for InMemorySubscriptionRepo {
    async fn get_for_user(&self, user_id: Uuid) -> AppResult<Option<SubscriptionState>> {
        Ok(self.subscriptions.lock().unwrap().get(&user_id).cloned())
    }
}

// ============================================================================
// InMemoryUsageRepo
// ============================================================================

/// Counter map guarded by one mutex, so check-and-increment is atomic the
/// same way the SQL conditional upsert is.
#[derive(Default)]
pub struct InMemoryUsageRepo {
    pub counters: Mutex<HashMap<(Uuid, String), i32>>,
}

impl InMemoryUsageRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_usage(user_id: Uuid, month: &BillingMonth, cases_created: i32) -> Self {
        let mut map = HashMap::new();
        map.insert((user_id, month.as_str().to_string()), cases_created);
        Self {
            counters: Mutex::new(map),
        }
    }
}

#[async_trait]
impl UsageRepo for InMemoryUsageRepo {
    async fn get(&self, user_id: Uuid, month: &BillingMonth) -> AppResult<Option<UsageCounter>> {
        Ok(self
            .counters
            .lock()
            .unwrap()
            .get(&(user_id, month.as_str().to_string()))
            .map(|&cases_created| UsageCounter {
                user_id,
                year_month: month.as_str().to_string(),
                cases_created,
            }))
    }

    async fn try_reserve_case_slot(
        &self,
        user_id: Uuid,
        month: &BillingMonth,
        ceiling: Option<i32>,
    ) -> AppResult<Option<i32>> {
        let mut counters = self.counters.lock().unwrap();
        let entry = counters
            .entry((user_id, month.as_str().to_string()))
            .or_insert(0);
        if let Some(max) = ceiling
            && *entry >= max
        {
            return Ok(None);
        }
        *entry += 1;
        Ok(Some(*entry))
    }

    async fn release_case_slot(&self, user_id: Uuid, month: &BillingMonth) -> AppResult<()> {
        let mut counters = self.counters.lock().unwrap();
        if let Some(entry) = counters.get_mut(&(user_id, month.as_str().to_string()))
            && *entry > 0
        {
            *entry -= 1;
        }
        Ok(())
    }
}

// ============================================================================
// InMemoryCaseRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryCaseRepo {
    pub cases: Mutex<Vec<CaseRecord>>,
}

impl InMemoryCaseRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CaseRepo for InMemoryCaseRepo {
    async fn create(&self, user_id: Uuid, title: &str) -> AppResult<CaseRecord> {
        let case = CaseRecord {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            created_at: Utc::now().naive_utc(),
        };
        self.cases.lock().unwrap().push(case.clone());
        Ok(case)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<CaseRecord>> {
        Ok(self
            .cases
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Failure-path mocks
// ============================================================================

/// Override store that is always down.
pub struct UnavailableOverrideRepo;

#[async_trait]
impl PlanOverrideRepo for UnavailableOverrideRepo {
    async fn get_active(&self, _user_id: Uuid) -> AppResult<Option<PlanOverride>> {
        Err(unavailable())
    }

    async fn get_latest(&self, _user_id: Uuid) -> AppResult<Option<PlanOverride>> {
        Err(unavailable())
    }

    async fn upsert(
        &self,
        _user_id: Uuid,
        _plan: &str,
        _is_active: bool,
        _created_by: Uuid,
    ) -> AppResult<PlanOverride> {
        Err(unavailable())
    }

    async fn deactivate(&self, _user_id: Uuid) -> AppResult<bool> {
        Err(unavailable())
    }
}

/// Subscription store that is always down.
pub struct UnavailableSubscriptionRepo;

#[async_trait]
impl SubscriptionRepo for UnavailableSubscriptionRepo {
    async fn get_for_user(&self, _user_id: Uuid) -> AppResult<Option<SubscriptionState>> {
        Err(unavailable())
    }
}

/// Usage store that is always down.
pub struct UnavailableUsageRepo;

#[async_trait]
impl UsageRepo for UnavailableUsageRepo {
    async fn get(&self, _user_id: Uuid, _month: &BillingMonth) -> AppResult<Option<UsageCounter>> {
        Err(unavailable())
    }

    async fn try_reserve_case_slot(
        &self,
        _user_id: Uuid,
        _month: &BillingMonth,
        _ceiling: Option<i32>,
    ) -> AppResult<Option<i32>> {
        Err(unavailable())
    }

    async fn release_case_slot(&self, _user_id: Uuid, _month: &BillingMonth) -> AppResult<()> {
        Err(unavailable())
    }
}

/// Case store whose inserts always fail, for compensation tests.
pub struct FailingCaseRepo;

#[async_trait]
impl CaseRepo for FailingCaseRepo {
    async fn create(&self, _user_id: Uuid, _title: &str) -> AppResult<CaseRecord> {
        Err(unavailable())
    }

    async fn list_for_user(&self, _user_id: Uuid) -> AppResult<Vec<CaseRecord>> {
        Err(unavailable())
    }
}
