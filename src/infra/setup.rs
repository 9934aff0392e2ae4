use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{http::app_state::AppState, persistence::PostgresPersistence},
    application::use_cases::{
        cases::{CaseRepo, CaseUseCases},
        entitlements::{EntitlementUseCases, PlanOverrideRepo, SubscriptionRepo, UsageRepo},
    },
    infra::{config::AppConfig, db::init_db},
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let pool = init_db(&config.database_url).await?;
    let postgres_arc = Arc::new(PostgresPersistence::new(pool));

    let override_repo_arc = postgres_arc.clone() as Arc<dyn PlanOverrideRepo>;
    let subscription_repo_arc = postgres_arc.clone() as Arc<dyn SubscriptionRepo>;
    let usage_repo_arc = postgres_arc.clone() as Arc<dyn UsageRepo>;
    let case_repo_arc = postgres_arc.clone() as Arc<dyn CaseRepo>;

    let entitlement_use_cases = Arc::new(EntitlementUseCases::new(
        override_repo_arc,
        subscription_repo_arc,
        usage_repo_arc,
    ));

    let case_use_cases = CaseUseCases::new(entitlement_use_cases.clone(), case_repo_arc);

    Ok(AppState {
        config: Arc::new(config),
        entitlement_use_cases,
        case_use_cases: Arc::new(case_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "briefhilfe_entitlements=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
