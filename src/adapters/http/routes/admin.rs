use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, put},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, middleware::AuthContext},
    app_error::{AppError, AppResult},
};

/// Admin console surface. Every handler re-checks the admin role from the
/// verified claims; there is no email-allowlist side door.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/plan-override",
            put(set_override).get(get_override).delete(deactivate_override),
        )
        .route("/users/{user_id}/entitlement", get(resolve_user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetOverrideRequest {
    plan: String,
    is_active: bool,
}

async fn set_override(
    State(app_state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetOverrideRequest>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;

    let saved = app_state
        .entitlement_use_cases
        .set_override(auth.user_id, user_id, &body.plan, body.is_active)
        .await?;
    Ok(Json(saved))
}

async fn get_override(
    State(app_state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;

    let row = app_state
        .entitlement_use_cases
        .get_override(user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(row))
}

async fn deactivate_override(
    State(app_state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;

    app_state
        .entitlement_use_cases
        .deactivate_override(auth.user_id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve any user's entitlement, planSource included, for support and
/// debugging from the admin console.
async fn resolve_user(
    State(app_state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;

    let entitlement = app_state.entitlement_use_cases.resolve(user_id).await?;
    Ok(Json(entitlement))
}
