//! 应用层

pub mod student;

use axum::{error_handling::HandleErrorLayer, middleware, Router};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::core::{error::handle_layer_error, middleware::request_logging_middleware};
use student::{handler::AppState, storage::StudentStorage};

/// 构建完整路由，存储实现在此注入
pub fn build_router(storage: Arc<dyn StudentStorage>, request_timeout: Duration) -> Router {
    student::routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(HandleErrorLayer::new(handle_layer_error))
                .timeout(request_timeout),
        )
        .with_state(AppState::new(storage))
}
