//! 学生处理器

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};

use super::{model::Student, storage::StudentStorage, validation::decode_and_validate};
use crate::core::{
    error::AppError,
    response::{CreatedResponse, MessageResponse},
};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StudentStorage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn StudentStorage>) -> Self {
        Self { storage }
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidIdentifier(raw.to_string()))
}

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    info!("creating a student");
    let payload = decode_and_validate(&body?)?;

    let id = state
        .storage
        .create_student(&payload.name, &payload.email, payload.age)
        .await
        .map_err(|e| {
            error!(error = %e, "error creating student");
            AppError::from_storage(e, "failed to create student")
        })?;

    info!(id, "student created successfully");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/students/:id
pub async fn get_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Student>, AppError> {
    info!(id = %raw_id, "getting a student");
    let id = parse_id(&raw_id)?;

    let student = state.storage.get_student_by_id(id).await.map_err(|e| {
        error!(id, error = %e, "error getting student");
        AppError::from_storage(e, "failed to get student")
    })?;

    Ok(Json(student))
}

/// GET /api/students
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    info!("getting all students");

    let students = state.storage.get_students().await.map_err(|e| {
        error!(error = %e, "error listing students");
        AppError::from_storage(e, "failed to list students")
    })?;

    Ok(Json(students))
}

/// PUT /api/students/:id
pub async fn update_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    info!(id = %raw_id, "updating a student");
    let id = parse_id(&raw_id)?;
    let student = decode_and_validate(&body?)?.into_student(id);

    state
        .storage
        .update_student_by_id(id, &student)
        .await
        .map_err(|e| {
            error!(id, error = %e, "error updating student");
            AppError::from_storage(e, "failed to update student")
        })?;

    Ok(Json(MessageResponse::new("student updated successfully")))
}

/// DELETE /api/students/:id
pub async fn delete_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    info!(id = %raw_id, "deleting a student");
    let id = parse_id(&raw_id)?;

    state.storage.delete_student_by_id(id).await.map_err(|e| {
        error!(id, error = %e, "error deleting student");
        AppError::from_storage(e, "failed to delete student")
    })?;

    Ok(Json(MessageResponse::new("student deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(AppError::InvalidIdentifier(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::InvalidIdentifier(_))));
    }
}
