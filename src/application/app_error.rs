use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// A backing data store could not be reached. Callers must treat this as
    /// a transient failure, never as "user is on the free plan".
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Administrator access required")]
    Forbidden,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Monthly case limit reached")]
    CaseLimitReached,

    #[error("Feature not available on current plan")]
    FeatureNotAvailable,

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    ResolutionFailed,
    InvalidCredentials,
    Forbidden,
    InvalidInput,
    CaseLimitReached,
    FeatureNotAvailable,
    NotFound,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ResolutionFailed => "RESOLUTION_FAILED",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::CaseLimitReached => "CASE_LIMIT_REACHED",
            ErrorCode::FeatureNotAvailable => "FEATURE_NOT_AVAILABLE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
