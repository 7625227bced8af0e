//! 学生存储接口

use async_trait::async_trait;

use super::model::Student;

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no student with id {0}")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 学生存储接口
///
/// 只有实现方可以分配 `id`；每个写操作对单条记录是原子的。
/// 实现必须可以被并发的请求共享。
#[async_trait]
pub trait StudentStorage: Send + Sync {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> Result<i64, StorageError>;

    async fn get_student_by_id(&self, id: i64) -> Result<Student, StorageError>;

    /// 按插入顺序返回
    async fn get_students(&self) -> Result<Vec<Student>, StorageError>;

    async fn delete_student_by_id(&self, id: i64) -> Result<(), StorageError>;

    /// 整体替换 name、email、age
    async fn update_student_by_id(&self, id: i64, student: &Student) -> Result<(), StorageError>;
}
