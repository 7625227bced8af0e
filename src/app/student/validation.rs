//! 请求体解码与校验

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use super::model::{FieldFailure, StudentPayload};
use crate::core::error::AppError;

/// 解码原始请求体，顶层必须是 JSON 对象
pub fn decode_payload(body: &[u8]) -> Result<StudentPayload, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::EmptyBody);
    }

    let object: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| AppError::MalformedPayload(e.to_string()))?;

    StudentPayload::deserialize(Value::Object(object))
        .map_err(|e| AppError::MalformedPayload(e.to_string()))
}

/// 校验已解码的请求体，返回所有失败字段
pub fn validate_payload(payload: &StudentPayload) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|errors| AppError::FieldValidation(field_failures(&errors)))
}

/// 解码并校验
pub fn decode_and_validate(body: &[u8]) -> Result<StudentPayload, AppError> {
    let payload = decode_payload(body)?;
    validate_payload(&payload)?;
    Ok(payload)
}

/// 每个字段只保留第一条失败规则，按字段名排序
fn field_failures(errors: &ValidationErrors) -> Vec<FieldFailure> {
    let mut failures: Vec<FieldFailure> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, field_errors)| {
            let field = field.to_string();
            field_errors.first().map(|error| {
                let rule_message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                FieldFailure {
                    message: format!("{field} {rule_message}"),
                    rule: error.code.to_string(),
                    field,
                }
            })
        })
        .collect();

    failures.sort_by(|a, b| a.field.cmp(&b.field));
    failures
}
