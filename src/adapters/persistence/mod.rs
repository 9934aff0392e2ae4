use sqlx::PgPool;

use crate::app_error::AppError;

pub mod case;
pub mod plan_override;
pub mod subscription;
pub mod usage;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                if msg.contains("duplicate key") || msg.contains("unique constraint") {
                    AppError::InvalidInput("A record with this value already exists".into())
                } else if msg.contains("foreign key") || msg.contains("violates foreign key") {
                    AppError::InvalidInput("Referenced record not found".into())
                } else {
                    tracing::error!(error = ?err, "Database error");
                    AppError::Internal("Database operation failed".into())
                }
            }
            // Connection, pool and I/O failures must stay distinguishable
            // from "row absent": callers may not read them as free tier.
            _ => {
                tracing::error!(error = ?err, "Data store unreachable");
                AppError::StoreUnavailable("Data store unreachable".into())
            }
        }
    }
}
