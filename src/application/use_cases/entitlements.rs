use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{
        entitlement::{EffectiveEntitlement, PlanSource},
        plan::{Feature, PlanKey},
        plan_override::PlanOverride,
        subscription::SubscriptionState,
        usage::{BillingMonth, UsageCounter, UsageSnapshot},
    },
};

#[async_trait]
pub trait PlanOverrideRepo: Send + Sync {
    /// The user's override row if one exists with `is_active = true`.
    async fn get_active(&self, user_id: Uuid) -> AppResult<Option<PlanOverride>>;
    /// The user's override row regardless of active state (admin view).
    async fn get_latest(&self, user_id: Uuid) -> AppResult<Option<PlanOverride>>;
    async fn upsert(
        &self,
        user_id: Uuid,
        plan: &str,
        is_active: bool,
        created_by: Uuid,
    ) -> AppResult<PlanOverride>;
    /// Deactivates (never deletes) the user's override. Returns false when no
    /// row existed.
    async fn deactivate(&self, user_id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait SubscriptionRepo: Send + Sync {
    async fn get_for_user(&self, user_id: Uuid) -> AppResult<Option<SubscriptionState>>;
}

#[async_trait]
pub trait UsageRepo: Send + Sync {
    async fn get(&self, user_id: Uuid, month: &BillingMonth) -> AppResult<Option<UsageCounter>>;

    /// Check-and-increment in a single atomic store operation. Increments the
    /// counter and returns the new count, or returns `None` without changing
    /// anything when the counter already sits at `ceiling`. A `ceiling` of
    /// `None` means unlimited: the increment always succeeds.
    async fn try_reserve_case_slot(
        &self,
        user_id: Uuid,
        month: &BillingMonth,
        ceiling: Option<i32>,
    ) -> AppResult<Option<i32>>;

    /// Compensating decrement for a reservation whose case insert failed.
    async fn release_case_slot(&self, user_id: Uuid, month: &BillingMonth) -> AppResult<()>;
}

/// Resolves a user's effective plan, limits and usage by strict precedence:
/// active admin override, then active paid subscription, then free tier.
#[derive(Clone)]
pub struct EntitlementUseCases {
    override_repo: Arc<dyn PlanOverrideRepo>,
    subscription_repo: Arc<dyn SubscriptionRepo>,
    usage_repo: Arc<dyn UsageRepo>,
}

impl EntitlementUseCases {
    pub fn new(
        override_repo: Arc<dyn PlanOverrideRepo>,
        subscription_repo: Arc<dyn SubscriptionRepo>,
        usage_repo: Arc<dyn UsageRepo>,
    ) -> Self {
        Self {
            override_repo,
            subscription_repo,
            usage_repo,
        }
    }

    /// Pure read; absent rows fall through to the next precedence tier.
    /// Store failures propagate as [`AppError::StoreUnavailable`] and are
    /// never collapsed into the free tier.
    #[instrument(skip(self))]
    pub async fn resolve(&self, user_id: Uuid) -> AppResult<EffectiveEntitlement> {
        let (plan, plan_source) =
            if let Some(ov) = self.override_repo.get_active(user_id).await? {
                (PlanKey::normalize(&ov.plan), PlanSource::Admin)
            } else {
                match self.subscription_repo.get_for_user(user_id).await? {
                    Some(sub) if sub.status().grants_paid_plan() => {
                        let key = PlanKey::normalize(&sub.plan_key);
                        if key == PlanKey::Free {
                            (PlanKey::Free, PlanSource::Free)
                        } else {
                            (key, PlanSource::Stripe)
                        }
                    }
                    _ => (PlanKey::Free, PlanSource::Free),
                }
            };

        let usage = self
            .usage_repo
            .get(user_id, &BillingMonth::current())
            .await?
            .as_ref()
            .map(UsageSnapshot::from)
            .unwrap_or_else(UsageSnapshot::zero);

        Ok(EffectiveEntitlement {
            plan,
            plan_source,
            limits: plan.definition().limits,
            usage,
        })
    }

    /// Resolve and gate on a boolean feature flag in one step.
    pub async fn require_feature(
        &self,
        user_id: Uuid,
        feature: Feature,
    ) -> AppResult<EffectiveEntitlement> {
        let entitlement = self.resolve(user_id).await?;
        if !entitlement.can_use_feature(feature) {
            return Err(AppError::FeatureNotAvailable);
        }
        Ok(entitlement)
    }

    /// Admin-only: set or replace the user's plan override. The caller must
    /// already be authorized; `admin_id` is recorded for the audit trail.
    /// The plan key goes through the same normalization as every other entry
    /// point, so an unknown key is stored as `free` (and warned about).
    #[instrument(skip(self))]
    pub async fn set_override(
        &self,
        admin_id: Uuid,
        user_id: Uuid,
        plan: &str,
        is_active: bool,
    ) -> AppResult<PlanOverride> {
        let canonical = PlanKey::normalize(plan);
        let saved = self
            .override_repo
            .upsert(user_id, canonical.as_str(), is_active, admin_id)
            .await?;

        tracing::info!(
            user_id = %user_id,
            plan = canonical.as_str(),
            is_active,
            set_by = %admin_id,
            "Plan override updated"
        );
        Ok(saved)
    }

    /// Admin-only revocation path: deactivate, never delete.
    #[instrument(skip(self))]
    pub async fn deactivate_override(&self, admin_id: Uuid, user_id: Uuid) -> AppResult<()> {
        if !self.override_repo.deactivate(user_id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(user_id = %user_id, revoked_by = %admin_id, "Plan override deactivated");
        Ok(())
    }

    pub async fn get_override(&self, user_id: Uuid) -> AppResult<Option<PlanOverride>> {
        self.override_repo.get_latest(user_id).await
    }

    pub(crate) fn usage_repo(&self) -> Arc<dyn UsageRepo> {
        self.usage_repo.clone()
    }
}
