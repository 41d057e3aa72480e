//! apikit endpoint SDK - Types and traits for writing transport-agnostic endpoints
//!
//! An endpoint is a stateless unit of business logic: an async mapping from a
//! request value to a response value or an application error. Endpoints know
//! nothing about HTTP; the server crate composes each endpoint with a decode
//! adapter and an encode adapter at registration time.

pub mod context;
pub mod endpoint;
pub mod error;

pub mod prelude {
    //! Common imports for apikit endpoints
    pub use crate::context::{RequestContext, RequestId};
    pub use crate::endpoint::{BoxFuture, Endpoint};
    pub use crate::error::EndpointError;
    pub use serde_json::{json, Value as JsonValue};
}

// Re-export key types at crate root
pub use context::{RequestContext, RequestId};
pub use endpoint::{BoxFuture, Endpoint};
pub use error::EndpointError;
