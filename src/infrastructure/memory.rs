//! 内存存储，用于测试

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::app::student::{
    model::Student,
    storage::{StorageError, StudentStorage},
};

#[derive(Default)]
struct Inner {
    last_id: i64,
    students: BTreeMap<i64, Student>,
}

/// 基于 `BTreeMap` 的存储，id 从 1 开始递增，因此遍历顺序即插入顺序
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStorage for MemoryStorage {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> Result<i64, StorageError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.students.insert(
            id,
            Student {
                id,
                name: name.to_string(),
                email: email.to_string(),
                age,
            },
        );
        Ok(id)
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student, StorageError> {
        let inner = self.inner.read().await;
        inner
            .students
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    async fn get_students(&self) -> Result<Vec<Student>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner.students.values().cloned().collect())
    }

    async fn delete_student_by_id(&self, id: i64) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        inner
            .students
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound(id))
    }

    async fn update_student_by_id(&self, id: i64, student: &Student) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        let existing = inner
            .students
            .get_mut(&id)
            .ok_or(StorageError::NotFound(id))?;

        existing.name = student.name.clone();
        existing.email = student.email.clone();
        existing.age = student.age;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ids_are_sequential_and_never_reused() {
        let storage = MemoryStorage::new();
        let first = storage.create_student("Ann", "a@x.com", 20).await.unwrap();
        let second = storage.create_student("Bob", "b@x.com", 21).await.unwrap();
        assert_eq!((first, second), (1, 2));

        storage.delete_student_by_id(second).await.unwrap();
        let third = storage.create_student("Cid", "c@x.com", 22).await.unwrap();
        assert_eq!(third, 3);
    }

    #[tokio::test]
    async fn test_missing_ids_report_not_found() {
        let storage = MemoryStorage::new();
        let student = Student {
            id: 5,
            name: "Ann".into(),
            email: "a@x.com".into(),
            age: 20,
        };

        assert!(matches!(
            storage.get_student_by_id(5).await,
            Err(StorageError::NotFound(5))
        ));
        assert!(matches!(
            storage.delete_student_by_id(5).await,
            Err(StorageError::NotFound(5))
        ));
        assert!(matches!(
            storage.update_student_by_id(5, &student).await,
            Err(StorageError::NotFound(5))
        ));
        assert!(storage.get_students().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let storage = MemoryStorage::new();
        let id = storage.create_student("Ann", "a@x.com", 20).await.unwrap();
        let replacement = Student {
            id: 42,
            name: "Anne".into(),
            email: "anne@x.com".into(),
            age: 21,
        };

        storage.update_student_by_id(id, &replacement).await.unwrap();
        let stored = storage.get_student_by_id(id).await.unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.name, "Anne");
        assert_eq!(stored.age, 21);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let storage = Arc::new(MemoryStorage::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let storage = Arc::clone(&storage);
            handles.push(tokio::spawn(async move {
                storage
                    .create_student(&format!("s{i}"), "s@x.com", 18)
                    .await
                    .unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(storage.get_students().await.unwrap().len(), 32);
    }
}
