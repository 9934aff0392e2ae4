use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app_error::{AppError, ErrorCode};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        match self {
            // Transient store failure is deliberately not a plan downgrade:
            // the caller gets a retry signal, never a free-tier answer.
            AppError::StoreUnavailable(_) => error_resp(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ResolutionFailed,
                Some("Couldn't verify your plan, please try again".to_string()),
            ),
            AppError::InvalidCredentials => error_resp(
                StatusCode::UNAUTHORIZED,
                ErrorCode::InvalidCredentials,
                None,
            ),
            AppError::Forbidden => error_resp(StatusCode::FORBIDDEN, ErrorCode::Forbidden, None),
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, Some(msg))
            }
            AppError::CaseLimitReached => error_resp(
                StatusCode::FORBIDDEN,
                ErrorCode::CaseLimitReached,
                Some("Monthly case limit reached for your plan".to_string()),
            ),
            AppError::FeatureNotAvailable => error_resp(
                StatusCode::FORBIDDEN,
                ErrorCode::FeatureNotAvailable,
                Some("This feature is not included in your plan".to_string()),
            ),
            AppError::NotFound => error_resp(StatusCode::NOT_FOUND, ErrorCode::NotFound, None),
            AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                None,
            ),
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    let body = match message {
        Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
        None => serde_json::json!({ "code": code.as_str() }),
    };
    (status, Json(body)).into_response()
}
