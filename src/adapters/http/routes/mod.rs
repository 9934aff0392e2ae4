pub mod admin;
pub mod cases;
pub mod entitlements;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/entitlements", entitlements::router())
        .nest("/cases", cases::router())
        .nest("/admin", admin::router())
}
