use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    adapters::http::{app_state::AppState, middleware::AuthContext},
    app_error::AppResult,
    application::use_cases::cases::CreateCaseInput,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_case).get(list_cases))
}

async fn create_case(
    State(app_state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(input): Json<CreateCaseInput>,
) -> AppResult<impl IntoResponse> {
    let case = app_state
        .case_use_cases
        .create_case(auth.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(case)))
}

async fn list_cases(
    State(app_state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> AppResult<impl IntoResponse> {
    let cases = app_state.case_use_cases.list_cases(auth.user_id).await?;
    Ok(Json(cases))
}
