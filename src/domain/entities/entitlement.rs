use serde::Serialize;

use crate::domain::entities::plan::{Feature, PlanKey, PlanLimits};
use crate::domain::entities::usage::UsageSnapshot;

/// Which data source determined the resolved plan. Carried for audit and
/// admin-console display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Admin,
    Stripe,
    Free,
}

/// Resolver output. Computed per call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveEntitlement {
    pub plan: PlanKey,
    pub plan_source: PlanSource,
    pub limits: PlanLimits,
    pub usage: UsageSnapshot,
}

impl EffectiveEntitlement {
    /// Whether the user may create another case this month. Pure function of
    /// the already-resolved entitlement; performs no I/O.
    pub fn can_create_case(&self) -> bool {
        match self.limits.max_cases_per_month {
            None => true,
            Some(max) => self.usage.cases_created < max,
        }
    }

    /// Whether a boolean-gated feature is available on the resolved plan.
    pub fn can_use_feature(&self, feature: Feature) -> bool {
        self.plan.definition().has_feature(feature)
    }
}
