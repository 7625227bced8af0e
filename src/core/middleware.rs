//! 核心中间件模块

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 请求日志中间件
///
/// 为每个请求分配 request id，整个处理过程运行在携带该 id 的 span 中，
/// 并通过 `x-request-id` 响应头返回给客户端。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let span = info_span!("request", request_id = %request_id);
    let mut response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    let duration = start.elapsed();

    span.in_scope(|| {
        info!(
            "{} {} - {} - {}ms",
            method,
            uri,
            status,
            duration.as_millis()
        );
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }

    response
}
