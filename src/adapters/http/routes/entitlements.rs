use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;

use crate::{
    adapters::http::{app_state::AppState, middleware::AuthContext},
    app_error::{AppError, AppResult},
    domain::entities::plan::Feature,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_my_entitlement))
        .route("/me/features/{feature}", get(check_feature))
}

async fn get_my_entitlement(
    State(app_state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> AppResult<impl IntoResponse> {
    let entitlement = app_state
        .entitlement_use_cases
        .resolve(auth.user_id)
        .await?;
    Ok(Json(entitlement))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureCheckResponse {
    feature: Feature,
    allowed: bool,
}

async fn check_feature(
    State(app_state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(feature): Path<String>,
) -> AppResult<impl IntoResponse> {
    let feature: Feature = feature
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Unknown feature: {feature}")))?;

    let entitlement = app_state
        .entitlement_use_cases
        .resolve(auth.user_id)
        .await?;

    Ok(Json(FeatureCheckResponse {
        feature,
        allowed: entitlement.can_use_feature(feature),
    }))
}
