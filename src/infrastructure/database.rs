//! 数据库基础设施

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Error,
};
use std::{path::Path, str::FromStr, time::Duration};
use tracing::info;

use crate::app::student::{
    model::Student,
    storage::{StorageError, StudentStorage},
};

pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// 打开（必要时创建）数据库文件并建表
    pub async fn new(storage_path: impl AsRef<Path>) -> Result<Self, Error> {
        let storage_path = storage_path.as_ref();
        if let Some(parent) = storage_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(Error::Io)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(storage_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(20)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(8))
            .connect_with(options)
            .await?;

        info!("Connected to database: {}", storage_path.display());
        Self::with_pool(pool).await
    }

    /// 内存数据库，池中只保留一个常驻连接，否则每个连接各自是一份独立的数据库
    pub async fn in_memory() -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, Error> {
        create_tables(&pool).await?;
        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn create_tables(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            age INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl StudentStorage for SqliteStorage {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> Result<i64, StorageError> {
        let result = sqlx::query("INSERT INTO students (name, email, age) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(age)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student, StorageError> {
        sqlx::query_as::<_, Student>("SELECT id, name, email, age FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound(id))
    }

    async fn get_students(&self) -> Result<Vec<Student>, StorageError> {
        let students =
            sqlx::query_as::<_, Student>("SELECT id, name, email, age FROM students ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(students)
    }

    async fn delete_student_by_id(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }

    async fn update_student_by_id(&self, id: i64, student: &Student) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE students SET name = ?, email = ?, age = ? WHERE id = ?")
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.age)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_and_list_in_insertion_order() {
        let storage = SqliteStorage::in_memory().await.unwrap();
        assert!(storage.get_students().await.unwrap().is_empty());

        let ann = storage.create_student("Ann", "a@x.com", 20).await.unwrap();
        let bob = storage.create_student("Bob", "b@x.com", 22).await.unwrap();
        assert!(ann > 0 && bob > ann);

        let students = storage.get_students().await.unwrap();
        let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob"]);
        assert_eq!(
            storage.get_student_by_id(ann).await.unwrap(),
            Student {
                id: ann,
                name: "Ann".into(),
                email: "a@x.com".into(),
                age: 20,
            }
        );
    }

    #[tokio::test]
    async fn test_update_same_values_twice() {
        let storage = SqliteStorage::in_memory().await.unwrap();
        let id = storage.create_student("Ann", "a@x.com", 20).await.unwrap();
        let replacement = Student {
            id,
            name: "Anne".into(),
            email: "anne@x.com".into(),
            age: 21,
        };

        storage.update_student_by_id(id, &replacement).await.unwrap();
        let first = storage.get_student_by_id(id).await.unwrap();
        storage.update_student_by_id(id, &replacement).await.unwrap();
        let second = storage.get_student_by_id(id).await.unwrap();

        assert_eq!(first, replacement);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let storage = SqliteStorage::in_memory().await.unwrap();
        let id = storage.create_student("Ann", "a@x.com", 20).await.unwrap();

        storage.delete_student_by_id(id).await.unwrap();
        assert!(matches!(
            storage.delete_student_by_id(id).await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.get_student_by_id(id).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_reports_not_found() {
        let storage = SqliteStorage::in_memory().await.unwrap();
        let ghost = Student {
            id: 9,
            name: "Ghost".into(),
            email: "g@x.com".into(),
            age: 30,
        };
        assert!(matches!(
            storage.update_student_by_id(9, &ghost).await,
            Err(StorageError::NotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_file_storage_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.db");

        let id = {
            let storage = SqliteStorage::new(&path).await.unwrap();
            let id = storage.create_student("Ann", "a@x.com", 20).await.unwrap();
            storage.get_pool().close().await;
            id
        };

        let reopened = SqliteStorage::new(&path).await.unwrap();
        assert_eq!(reopened.get_student_by_id(id).await.unwrap().name, "Ann");
    }
}
