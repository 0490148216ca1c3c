use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Convert a sqlx::Error into an AppError.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation (error code 23505)
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or_default();
                let friendly = if constraint.starts_with("users_email") {
                    "An account with this email already exists"
                } else if constraint.starts_with("user_roles_user_id") {
                    "This user already has a role"
                } else if constraint.starts_with("customers_user_id") {
                    "This user already has a subscription"
                } else if constraint.starts_with("delivery_partners_user_id") {
                    "This user is already a delivery partner"
                } else {
                    "A record with this value already exists"
                };
                return AppError::conflict(friendly);
            }
            // Foreign key violation (error code 23503)
            if db_err.code().as_deref() == Some("23503") {
                return AppError::not_found("Referenced record not found");
            }
            tracing::error!(error = %err, "database error");
            AppError::database("A database error occurred")
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Configuration(_) => {
            tracing::error!(error = %err, "database unavailable");
            AppError::database("The database is unavailable")
        }
        _ => {
            tracing::error!(error = %err, "database error");
            AppError::database("A database error occurred")
        }
    }
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
