//! Request tracing middleware.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;

/// Header carrying the id assigned to each request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs the start and end of every request under a generated request id,
/// and returns that id to the caller.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let delivery = request
        .headers()
        .get("x-github-delivery")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    tracing::info!(
        request_id = %request_id,
        delivery = %delivery,
        method = %request.method(),
        uri = %request.uri(),
        "Request started"
    );

    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
