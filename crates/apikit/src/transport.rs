//! HTTP transport for endpoints
//!
//! Adapts between axum's request/response types and the transport-agnostic
//! endpoint contract. Each route composes one endpoint with one decode
//! adapter and one encode adapter via [`EndpointHandler`]; the three stages
//! communicate only through the request context and the typed payload values.
//!
//! Every failure is converted into a structured JSON error response: decode
//! failures map to 400, endpoint failures to the error's own status (502 for
//! upstream faults), encode failures to 500. Serialization happens before any
//! status or header is committed, so an encode failure can never leave the
//! client with a truncated 200 body.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use apikit_endpoint::{BoxFuture, Endpoint, EndpointError, RequestContext};

/// Extracts a request value from the inbound transport request.
///
/// Receives the request context unchanged and must not consume cancellation
/// itself; dropping the request future cancels all stages.
pub type DecodeFn<Req> =
    Arc<dyn Fn(RequestContext, Request) -> BoxFuture<'static, Result<Req, EndpointError>> + Send + Sync>;

/// Serializes a response value into a complete transport response.
pub type EncodeFn<Resp> = Arc<dyn Fn(&RequestContext, Resp) -> Result<Response, EndpointError> + Send + Sync>;

/// One endpoint composed with its decode and encode adapters.
///
/// Registered once against a route; cloned per registration, invoked
/// concurrently per request with no shared mutable state.
pub struct EndpointHandler<Req, Resp> {
    endpoint: Arc<dyn Endpoint<Req, Resp>>,
    decode: DecodeFn<Req>,
    encode: EncodeFn<Resp>,
}

impl<Req, Resp> Clone for EndpointHandler<Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            decode: self.decode.clone(),
            encode: self.encode.clone(),
        }
    }
}

impl<Req, Resp> EndpointHandler<Req, Resp>
where
    Req: Send + 'static,
    Resp: Send + 'static,
{
    pub fn new<E>(endpoint: E, decode: DecodeFn<Req>, encode: EncodeFn<Resp>) -> Self
    where
        E: Endpoint<Req, Resp>,
    {
        Self {
            endpoint: Arc::new(endpoint),
            decode,
            encode,
        }
    }

    /// Run decode, endpoint and encode for one inbound request.
    ///
    /// Each stage short-circuits on error; the error is logged with the
    /// request id and returned to the client as a JSON error response.
    pub async fn handle(&self, request: Request) -> Response {
        let cx = RequestContext::new();

        let req = match (self.decode)(cx.clone(), request).await {
            Ok(req) => req,
            Err(err) => {
                tracing::error!(request_id = %cx.request_id(), "Error decoding request: {}", err);
                return error_response(&err);
            }
        };

        let resp = match self.endpoint.call(cx.clone(), req).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::error!(request_id = %cx.request_id(), "Error calling endpoint: {}", err);
                return error_response(&err);
            }
        };

        match (self.encode)(&cx, resp) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(request_id = %cx.request_id(), "Error encoding response: {}", err);
                error_response(&err)
            }
        }
    }
}

/// Convert an error into a structured JSON error response
pub fn error_response(err: &EndpointError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// Decode adapter that extracts the raw request body without parsing it.
///
/// Bodies larger than `limit` bytes are rejected as a bad request.
pub fn decode_raw_body(limit: usize) -> DecodeFn<Bytes> {
    Arc::new(move |_cx: RequestContext, request: Request| {
        Box::pin(async move {
            axum::body::to_bytes(request.into_body(), limit)
                .await
                .map_err(|err| EndpointError::bad_request(format!("failed to read request body: {err}")))
        })
    })
}

/// Decode adapter that parses the request body as JSON into `T`
pub fn decode_json<T>(limit: usize) -> DecodeFn<T>
where
    T: DeserializeOwned + Send + 'static,
{
    Arc::new(move |_cx: RequestContext, request: Request| {
        Box::pin(async move {
            let body = axum::body::to_bytes(request.into_body(), limit)
                .await
                .map_err(|err| EndpointError::bad_request(format!("failed to read request body: {err}")))?;

            serde_json::from_slice(&body)
                .map_err(|err| EndpointError::bad_request(format!("invalid JSON body: {err}")))
        })
    })
}

/// Encode adapter that serializes the response value as JSON with status 200.
///
/// Serializes into a buffer before committing status or headers.
pub fn encode_json<T>() -> EncodeFn<T>
where
    T: Serialize + Send + 'static,
{
    Arc::new(|_cx: &RequestContext, value: T| {
        let body = serde_json::to_vec(&value)?;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
            .body(Body::from(body))
            .map_err(|err| EndpointError::internal(format!("failed to build response: {err}")))
    })
}
