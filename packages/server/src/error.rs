use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::judge::execution::ExecutionError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `EMPTY_TEST_SET`, `EXECUTION_BACKEND_ERROR`, `EXECUTION_TIMEOUT`,
    /// `PERSISTENCE_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Missing required field: problem_id")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Request rejected before any external call was made.
    Validation(String),
    NotFound(String),
    /// The problem exists but has no test cases, so it cannot be judged.
    EmptyTestSet(String),
    /// Transport or protocol failure talking to the execution backend.
    ExecutionBackend(String),
    /// The poll bound was exhausted with items still running. No verdict is
    /// synthesized from incomplete data.
    ExecutionTimeout { attempts: u32 },
    Database(DbErr),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::EmptyTestSet(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "EMPTY_TEST_SET",
                    message: msg,
                },
            ),
            AppError::ExecutionBackend(detail) => {
                tracing::error!("Execution backend error: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        code: "EXECUTION_BACKEND_ERROR",
                        message: "Execution backend request failed".into(),
                    },
                )
            }
            AppError::ExecutionTimeout { attempts } => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorBody {
                    code: "EXECUTION_TIMEOUT",
                    message: format!(
                        "Execution did not finish within {} status polls",
                        attempts
                    ),
                },
            ),
            AppError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "PERSISTENCE_ERROR",
                        message: "Failed to persist submission state".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err)
    }
}

impl From<ExecutionError> for AppError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::Timeout { attempts } => AppError::ExecutionTimeout { attempts },
            other => AppError::ExecutionBackend(other.to_string()),
        }
    }
}
