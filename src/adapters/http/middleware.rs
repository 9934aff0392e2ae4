use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::jwt,
};

/// Verified identity attached to the request after the auth middleware ran.
/// Token issuance lives upstream; this service only verifies.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub roles: Vec<String>,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == jwt::ADMIN_ROLE)
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

pub async fn auth_middleware(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(access_cookie) = jar.get("access_token") else {
        return Err(AppError::InvalidCredentials);
    };
    let claims = jwt::verify(access_cookie.value(), &app_state.config.jwt_secret)?;
    let user_id =
        Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidCredentials)?;

    request.extensions_mut().insert(AuthContext {
        user_id,
        roles: claims.roles,
    });

    Ok(next.run(request).await)
}
