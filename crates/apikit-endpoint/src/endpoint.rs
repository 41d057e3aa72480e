//! The endpoint contract
//!
//! An endpoint maps a request value to a response value or an application
//! error. The request and response types are generic per route, so a route's
//! payload shapes are checked at compile time while the three-stage
//! decode/invoke/encode contract stays the same for every route.
//!
//! Endpoints are created at startup, shared behind `Arc`, and invoked
//! concurrently with no shared mutable state. Any plain async fn or closure
//! with the right signature is an endpoint:
//!
//! ```ignore
//! async fn greet(_cx: RequestContext, name: String) -> Result<JsonValue, EndpointError> {
//!     Ok(json!({ "greeting": format!("hello, {name}") }))
//! }
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::context::RequestContext;
use crate::error::EndpointError;

/// Type alias for boxed futures returned by endpoints
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A transport-agnostic unit of business logic.
///
/// Implemented automatically for async fns and closures taking
/// `(RequestContext, Req)` and returning `Result<Resp, EndpointError>`.
pub trait Endpoint<Req, Resp>: Send + Sync + 'static {
    fn call(&self, cx: RequestContext, req: Req) -> BoxFuture<'static, Result<Resp, EndpointError>>;
}

impl<F, Fut, Req, Resp> Endpoint<Req, Resp> for F
where
    F: Fn(RequestContext, Req) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Resp, EndpointError>> + Send + 'static,
{
    fn call(&self, cx: RequestContext, req: Req) -> BoxFuture<'static, Result<Resp, EndpointError>> {
        Box::pin(self(cx, req))
    }
}
