use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::entitlements::{EntitlementUseCases, UsageRepo},
    domain::entities::{case::CaseRecord, usage::BillingMonth},
};

const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseInput {
    pub title: String,
}

#[async_trait]
pub trait CaseRepo: Send + Sync {
    async fn create(&self, user_id: Uuid, title: &str) -> AppResult<CaseRecord>;
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<CaseRecord>>;
}

/// Case creation with plan-limit enforcement. The limit check and the usage
/// increment happen as one atomic store operation, so two concurrent requests
/// can never both slip under the same remaining allowance.
#[derive(Clone)]
pub struct CaseUseCases {
    entitlements: Arc<EntitlementUseCases>,
    case_repo: Arc<dyn CaseRepo>,
    usage_repo: Arc<dyn UsageRepo>,
}

impl CaseUseCases {
    pub fn new(entitlements: Arc<EntitlementUseCases>, case_repo: Arc<dyn CaseRepo>) -> Self {
        let usage_repo = entitlements.usage_repo();
        Self {
            entitlements,
            case_repo,
            usage_repo,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_case(
        &self,
        user_id: Uuid,
        input: CreateCaseInput,
    ) -> AppResult<CaseRecord> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput("Title must not be empty".into()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::InvalidInput(format!(
                "Title must be at most {MAX_TITLE_LEN} characters"
            )));
        }

        let entitlement = self.entitlements.resolve(user_id).await?;
        // Advisory pre-check; the reservation below is the authoritative one.
        if !entitlement.can_create_case() {
            return Err(AppError::CaseLimitReached);
        }

        let month = BillingMonth::current();
        let ceiling = entitlement.limits.max_cases_per_month;
        let reserved = self
            .usage_repo
            .try_reserve_case_slot(user_id, &month, ceiling)
            .await?;
        if reserved.is_none() {
            return Err(AppError::CaseLimitReached);
        }

        match self.case_repo.create(user_id, title).await {
            Ok(case) => {
                tracing::info!(user_id = %user_id, case_id = %case.id, "Case created");
                Ok(case)
            }
            Err(err) => {
                // The slot was reserved but the case never materialized.
                if let Err(release_err) = self.usage_repo.release_case_slot(user_id, &month).await {
                    tracing::error!(
                        user_id = %user_id,
                        error = ?release_err,
                        "Failed to release case slot after insert failure"
                    );
                }
                Err(err)
            }
        }
    }

    pub async fn list_cases(&self, user_id: Uuid) -> AppResult<Vec<CaseRecord>> {
        self.case_repo.list_for_user(user_id).await
    }
}
