use std::sync::Arc;

use crate::{
    application::use_cases::{cases::CaseUseCases, entitlements::EntitlementUseCases},
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub entitlement_use_cases: Arc<EntitlementUseCases>,
    pub case_use_cases: Arc<CaseUseCases>,
}
