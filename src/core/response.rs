//! 核心响应处理模块

use serde::{Deserialize, Serialize};

use crate::app::student::model::FieldFailure;

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldFailure>>,
}

impl ErrorResponse {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            errors: None,
        }
    }

    pub fn validation(message: impl Into<String>, failures: Vec<FieldFailure>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            errors: Some(failures),
        }
    }
}

/// 创建成功响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// 简短消息响应
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_general_error_shape() {
        let body = serde_json::to_value(ErrorResponse::general("empty body")).unwrap();
        assert_eq!(body, json!({"status": "error", "message": "empty body"}));
    }

    #[test]
    fn test_validation_error_shape() {
        let failures = vec![FieldFailure {
            field: "email".to_string(),
            rule: "required".to_string(),
            message: "email is a required field".to_string(),
        }];
        let body = serde_json::to_value(ErrorResponse::validation(
            "email is a required field",
            failures,
        ))
        .unwrap();

        assert_eq!(body["status"], "error");
        assert_eq!(body["errors"][0]["field"], "email");
        assert_eq!(body["errors"][0]["rule"], "required");
    }
}
