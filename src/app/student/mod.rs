//! 学生管理

pub mod handler;
pub mod model;
pub mod storage;
pub mod validation;

use axum::{routing::get, Router};

use handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/students",
            get(handler::list_students).post(handler::create_student),
        )
        .route(
            "/api/students/:id",
            get(handler::get_student)
                .put(handler::update_student)
                .delete(handler::delete_student),
        )
}
