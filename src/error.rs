//! Error types for Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Application error codes exposed in every error response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 2,
    NoSuchBook = 3,
    NoSuchAuthor = 4,
    NoSuchMember = 5,
    NoSuchLoan = 6,
    OutOfStock = 7,
    Duplicate = 8,
    BadValue = 9,
    EmptyUpdate = 10,
    Busy = 11,
}

/// The kind of entity a failed reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    Author,
    Member,
    Loan,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Book => write!(f, "Book"),
            EntityKind::Author => write!(f, "Author"),
            EntityKind::Member => write!(f, "Member"),
            EntityKind::Loan => write!(f, "Loan"),
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{kind} with id {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("Book with id {book_id} has no available copies")]
    OutOfStock { book_id: i64 },

    #[error("No fields supplied for update")]
    EmptyUpdate,

    #[error("Record is locked by a concurrent operation, retry later")]
    Busy,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        // Lock waits beyond the transaction's lock_timeout, deadlocks broken
        // by the server and serialization failures are all safe to retry.
        if let Some(db) = e.as_database_error() {
            match db.code().as_deref() {
                Some("55P03") | Some("40001") | Some("40P01") => return AppError::Busy,
                Some("23505") => {
                    return AppError::Conflict("A record with this value already exists".to_string())
                }
                Some("23503") => {
                    return AppError::Conflict(
                        "Operation violates a reference to another record".to_string(),
                    )
                }
                _ => {}
            }
        }
        AppError::Database(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound { kind, .. } => match kind {
                EntityKind::Book => ErrorCode::NoSuchBook,
                EntityKind::Author => ErrorCode::NoSuchAuthor,
                EntityKind::Member => ErrorCode::NoSuchMember,
                EntityKind::Loan => ErrorCode::NoSuchLoan,
            },
            AppError::OutOfStock { .. } => ErrorCode::OutOfStock,
            AppError::EmptyUpdate => ErrorCode::EmptyUpdate,
            AppError::Busy => ErrorCode::Busy,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Conflict(_) => ErrorCode::Duplicate,
            AppError::Database(_) => ErrorCode::DbFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::OutOfStock { .. } => StatusCode::CONFLICT,
            AppError::EmptyUpdate => StatusCode::BAD_REQUEST,
            AppError::Busy => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_entity_code() {
        let err = AppError::NotFound {
            kind: EntityKind::Loan,
            id: 7,
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), ErrorCode::NoSuchLoan);
        assert_eq!(err.to_string(), "Loan with id 7 not found");
    }

    #[test]
    fn out_of_stock_is_a_conflict() {
        let err = AppError::OutOfStock { book_id: 3 };
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), ErrorCode::OutOfStock);
    }

    #[test]
    fn busy_is_retryable_service_unavailable() {
        assert_eq!(AppError::Busy.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn empty_update_is_a_client_error() {
        assert_eq!(AppError::EmptyUpdate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmptyUpdate.code(), ErrorCode::EmptyUpdate);
    }
}
