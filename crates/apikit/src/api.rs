//! HTTP surface: demo endpoints and route registration

use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Json, Router};
use bytes::Bytes;
use serde_json::{json, Value};

use apikit_endpoint::{EndpointError, RequestContext};

use crate::config::AppConfig;
use crate::telemetry::{telemetry_middleware, RequestInterceptor, TelemetryState};
use crate::transport::{decode_raw_body, encode_json, EndpointHandler};

/// Demonstration endpoint: ignores its decoded input entirely and returns a
/// constant payload. Exists to exercise the pipeline shape; a real endpoint
/// would do its domain work here.
async fn test_endpoint(_cx: RequestContext, _body: Bytes) -> Result<Value, EndpointError> {
    Ok(json!({ "message": "test" }))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Create the application router.
///
/// `/v1/test` runs through the endpoint pipeline; `/v1/hello2` is a direct
/// handler that never touches the pipeline. When an interceptor is provided
/// it is attached as middleware ahead of routing.
pub fn create_router(config: &AppConfig, interceptor: Option<Arc<dyn RequestInterceptor>>) -> Router {
    let test = EndpointHandler::new(
        test_endpoint,
        decode_raw_body(config.max_body_size),
        encode_json::<Value>(),
    );

    let v1 = Router::new()
        .route(
            "/test",
            get(move |request: Request| async move { test.handle(request).await }),
        )
        .route("/hello2", get(|| async { Json(json!({ "message": "hello2" })) }));

    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/v1", v1);

    match interceptor {
        Some(interceptor) => router.layer(middleware::from_fn_with_state(
            TelemetryState::new(interceptor),
            telemetry_middleware,
        )),
        None => router,
    }
}
