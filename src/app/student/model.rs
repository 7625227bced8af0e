//! 学生数据模型

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// 持久化的学生记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// 创建/更新请求体
///
/// 缺失的字段解码为空值，由校验规则拒绝；请求体中的 `id` 会被忽略。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct StudentPayload {
    #[validate(length(min = 1, code = "required", message = "is a required field"))]
    pub name: String,

    #[validate(length(min = 1, code = "required", message = "is a required field"))]
    pub email: String,

    // 0 与缺失无法区分，同样视为缺失
    #[validate(custom(function = "validate_required_age"))]
    pub age: i64,
}

impl StudentPayload {
    /// 以路径中的 id 构造完整记录
    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

fn validate_required_age(age: i64) -> Result<(), ValidationError> {
    if age == 0 {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::Borrowed("is a required field"));
        return Err(err);
    }
    Ok(())
}

/// 单个字段的校验失败描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFailure {
    pub field: String,
    pub rule: String,
    pub message: String,
}
