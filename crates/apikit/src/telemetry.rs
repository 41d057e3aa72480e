//! Telemetry request interceptor
//!
//! The routing core has no compiled-in dependency on any telemetry vendor.
//! Observability collaborators plug in through the [`RequestInterceptor`]
//! seam: a pre-call hook ahead of routing and a post-call hook once the
//! response is ready. Interceptors observe request metadata only; request and
//! response bodies pass through untouched.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Level;
use url::Url;

use crate::config::TelemetrySettings;

/// Request metadata observed before routing
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub method: String,
    pub path: String,
}

/// Response metadata observed once the response is ready
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    pub status: u16,
    pub latency: Duration,
}

/// Pre/post request hooks for observability collaborators
pub trait RequestInterceptor: Send + Sync {
    /// Called before the request is routed
    fn on_request(&self, request: &RequestRecord);

    /// Called after the response has been produced
    fn on_response(&self, request: &RequestRecord, response: &ResponseRecord);
}

/// State carried by the telemetry middleware
#[derive(Clone)]
pub struct TelemetryState {
    interceptor: Arc<dyn RequestInterceptor>,
}

impl TelemetryState {
    pub fn new(interceptor: Arc<dyn RequestInterceptor>) -> Self {
        Self { interceptor }
    }
}

/// Middleware running the interceptor hooks around routing
pub async fn telemetry_middleware(
    State(state): State<TelemetryState>,
    request: Request,
    next: Next,
) -> Response {
    let record = RequestRecord {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
    };

    state.interceptor.on_request(&record);
    let started = Instant::now();

    let response = next.run(request).await;

    state.interceptor.on_response(
        &record,
        &ResponseRecord {
            status: response.status().as_u16(),
            latency: started.elapsed(),
        },
    );

    response
}

/// Built-in interceptor reporting request records through `tracing`,
/// tagged with the configured application name and environment.
pub struct TelemetryClient {
    collector: Url,
    application_name: String,
    environment: String,
    logging_enabled: bool,
    verbosity: Level,
}

impl TelemetryClient {
    /// Validate the settings and build the client.
    ///
    /// Fails when the collector endpoint is not a valid URL; the caller is
    /// expected to log the error and continue without the interceptor.
    pub fn init(settings: TelemetrySettings) -> Result<Self> {
        let collector = Url::parse(&settings.endpoint)
            .with_context(|| format!("invalid telemetry endpoint '{}'", settings.endpoint))?;

        Ok(Self {
            collector,
            application_name: settings.application_name,
            environment: settings.environment,
            logging_enabled: settings.logging_enabled,
            verbosity: settings.log_level,
        })
    }

    /// The collector endpoint this client reports to
    pub fn collector(&self) -> &Url {
        &self.collector
    }
}

impl RequestInterceptor for TelemetryClient {
    fn on_request(&self, request: &RequestRecord) {
        if !self.logging_enabled || self.verbosity < Level::DEBUG {
            return;
        }
        tracing::debug!(
            target: "apikit::telemetry",
            app = %self.application_name,
            env = %self.environment,
            collector = %self.collector,
            method = %request.method,
            path = %request.path,
            "observed request"
        );
    }

    fn on_response(&self, request: &RequestRecord, response: &ResponseRecord) {
        if !self.logging_enabled {
            return;
        }
        tracing::info!(
            target: "apikit::telemetry",
            app = %self.application_name,
            env = %self.environment,
            method = %request.method,
            path = %request.path,
            status = response.status,
            latency_ms = response.latency.as_millis() as u64,
            "observed response"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    use super::*;

    fn settings(endpoint: &str) -> TelemetrySettings {
        TelemetrySettings {
            enabled: true,
            endpoint: endpoint.to_string(),
            application_name: "apikit-demo".to_string(),
            environment: "stage".to_string(),
            logging_enabled: true,
            log_level: Level::INFO,
        }
    }

    #[test]
    fn test_init_accepts_valid_collector_url() {
        let client = TelemetryClient::init(settings("http://localhost:8080")).unwrap();
        assert_eq!(client.collector().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_init_rejects_malformed_collector_url() {
        assert!(TelemetryClient::init(settings("not a url")).is_err());
    }

    /// Records hook invocations for asserting order and content
    #[derive(Default)]
    struct RecordingInterceptor {
        events: Mutex<Vec<String>>,
    }

    impl RequestInterceptor for RecordingInterceptor {
        fn on_request(&self, request: &RequestRecord) {
            self.events
                .lock()
                .unwrap()
                .push(format!("request {} {}", request.method, request.path));
        }

        fn on_response(&self, request: &RequestRecord, response: &ResponseRecord) {
            self.events
                .lock()
                .unwrap()
                .push(format!("response {} {}", request.path, response.status));
        }
    }

    #[tokio::test]
    async fn test_hooks_fire_around_routing() {
        let interceptor = Arc::new(RecordingInterceptor::default());

        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn_with_state(
                TelemetryState::new(interceptor.clone()),
                telemetry_middleware,
            ));

        let request = axum::http::Request::builder()
            .uri("/ping")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // Interceptor observed both sides and did not alter the response
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"pong");

        let events = interceptor.events.lock().unwrap();
        assert_eq!(events.as_slice(), ["request GET /ping", "response /ping 200"]);
    }
}
