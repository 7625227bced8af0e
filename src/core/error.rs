//! 核心错误处理模块

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};

use super::response::ErrorResponse;
use crate::app::student::{model::FieldFailure, storage::StorageError};

/// 请求处理过程中的错误
///
/// 解码和校验错误在处理器内部产生，永远不会到达存储层；
/// 存储层错误只按 "未找到" 与 "其他" 两类区分。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("empty body")]
    EmptyBody,

    #[error("invalid JSON body: {0}")]
    MalformedPayload(String),

    #[error("{}", join_messages(.0))]
    FieldValidation(Vec<FieldFailure>),

    #[error("invalid ID format: {0}")]
    InvalidIdentifier(String),

    #[error("student with ID {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Storage(String),

    #[error("request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("request timed out")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 将存储层错误归类，`context` 形如 "failed to delete student"
    pub fn from_storage(err: StorageError, context: &str) -> Self {
        match err {
            StorageError::NotFound(id) => AppError::NotFound(id),
            other => AppError::Storage(format!("{context}: {other}")),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyBody
            | AppError::MalformedPayload(_)
            | AppError::FieldValidation(_)
            | AppError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::MalformedPayload(rejection.body_text())
        }
    }
}

/// 中间件层（超时等）产生的错误
pub async fn handle_layer_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(err.to_string())
    }
}

fn join_messages(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        let body = match self {
            AppError::FieldValidation(failures) => ErrorResponse::validation(message, failures),
            _ => ErrorResponse::general(message),
        };

        (status, Json(body)).into_response()
    }
}
