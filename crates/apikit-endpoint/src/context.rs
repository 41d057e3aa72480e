//! Request-scoped context passed through the endpoint pipeline
//!
//! The context is the only thing the three pipeline stages share. It carries
//! request metadata (the request id), never transport objects. Cancellation is
//! inherited from the transport: when the server drops the request future, all
//! stages stop at their next await point. No stage installs its own timeout.

use uuid::Uuid;

/// Request identifier for tracing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Create a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from a string
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context handed to decode, endpoint and encode for one request.
///
/// Cheap to clone; stages receive it unchanged and must not consume it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
}

impl RequestContext {
    /// Create a context with a fresh request id
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
        }
    }

    /// Create a context carrying an existing request id
    pub fn with_request_id(request_id: RequestId) -> Self {
        Self { request_id }
    }

    /// The id of the request this context belongs to
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_request_id_display_matches_inner() {
        let id = RequestId::from_string("req-1234".to_string());
        assert_eq!(id.to_string(), "req-1234");
        assert_eq!(id.as_str(), "req-1234");
    }

    #[test]
    fn test_context_clone_keeps_request_id() {
        let cx = RequestContext::new();
        let cloned = cx.clone();
        assert_eq!(cx.request_id(), cloned.request_id());
    }
}
