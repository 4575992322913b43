//! Failure outcome handlers.
//!
//! A failed verification always ends at a [`CsrfErrorHandler`]: either one
//! that answers the request directly ([`RespondOnFailure`]) or one that
//! raises a structured error for an outer translation layer
//! ([`RaiseOnFailure`]). Deployments with several candidates register them
//! in a [`HandlerRegistry`] and pick one by id through
//! [`CsrfConfig::with_error_handler`](crate::CsrfConfig::with_error_handler).

use crate::error::{CsrfError, Result};
use crate::http::{HttpRequest, HttpResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Produces the terminal outcome of a failed verification.
#[async_trait]
pub trait CsrfErrorHandler: Send + Sync {
    /// Turn a rejected request into a response, or propagate a structured
    /// error. The middleware passes the result upward without inspecting it.
    async fn error_response(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
        status: u16,
        reason: &str,
    ) -> Result<HttpResponse>;
}

/// Handler that answers the request directly with the failure status.
///
/// Attaches the status code and reason phrase and writes the reason as a
/// plain-text body; the rest of the chain is not invoked.
#[derive(Debug, Clone, Copy, Default)]
pub struct RespondOnFailure;

#[async_trait]
impl CsrfErrorHandler for RespondOnFailure {
    async fn error_response(
        &self,
        _request: &HttpRequest,
        response: HttpResponse,
        status: u16,
        reason: &str,
    ) -> Result<HttpResponse> {
        Ok(response
            .with_status(status)
            .with_reason(reason)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body(reason.as_bytes().to_vec()))
    }
}

/// Handler that raises a structured error instead of answering.
///
/// Chains using this variant need an outer error-translation layer to map
/// [`CsrfError::Rejected`] into a client-visible response.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaiseOnFailure;

#[async_trait]
impl CsrfErrorHandler for RaiseOnFailure {
    async fn error_response(
        &self,
        _request: &HttpRequest,
        _response: HttpResponse,
        status: u16,
        reason: &str,
    ) -> Result<HttpResponse> {
        Err(CsrfError::Rejected {
            status,
            reason: reason.to_string(),
        })
    }
}

/// Named handler lookup for deployments with multiple candidates.
///
/// Comes pre-loaded with the two built-in handlers under `"respond"` and
/// `"raise"`, with `"respond"` as the default.
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn CsrfErrorHandler>>,
    default: String,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        let mut handlers: HashMap<String, Arc<dyn CsrfErrorHandler>> = HashMap::new();
        handlers.insert("respond".to_string(), Arc::new(RespondOnFailure));
        handlers.insert("raise".to_string(), Arc::new(RaiseOnFailure));
        Self {
            handlers,
            default: "respond".to_string(),
        }
    }

    /// Register a handler under `id`, replacing any previous entry.
    pub fn register(&mut self, id: impl Into<String>, handler: Arc<dyn CsrfErrorHandler>) {
        self.handlers.insert(id.into(), handler);
    }

    /// Change which handler `resolve(None)` returns.
    pub fn set_default(&mut self, id: impl Into<String>) {
        self.default = id.into();
    }

    /// Look up a handler by id, falling back to the default for `None`.
    pub fn resolve(&self, id: Option<&str>) -> Result<Arc<dyn CsrfErrorHandler>> {
        let id = id.unwrap_or(&self.default);
        self.handlers
            .get(id)
            .cloned()
            .ok_or_else(|| CsrfError::UnknownHandler(id.to_string()))
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rejection;

    #[test]
    fn test_respond_on_failure() {
        let handler = RespondOnFailure;
        let request = HttpRequest::new("POST", "/submit");
        let reason = Rejection::MissingInBody.reason();

        let response = tokio_test::block_on(handler.error_response(
            &request,
            HttpResponse::ok(),
            Rejection::STATUS,
            reason,
        ))
        .unwrap();

        assert_eq!(response.status, 424);
        assert_eq!(response.reason.as_deref(), Some(reason));
        assert_eq!(response.body, reason.as_bytes());
    }

    #[test]
    fn test_raise_on_failure() {
        let handler = RaiseOnFailure;
        let request = HttpRequest::new("POST", "/submit");
        let reason = Rejection::NotSame.reason();

        let result = tokio_test::block_on(handler.error_response(
            &request,
            HttpResponse::ok(),
            Rejection::STATUS,
            reason,
        ));

        match result {
            Err(CsrfError::Rejected { status, reason: r }) => {
                assert_eq!(status, 424);
                assert_eq!(r, reason);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_resolve() {
        let registry = HandlerRegistry::new();
        assert!(registry.resolve(None).is_ok());
        assert!(registry.resolve(Some("respond")).is_ok());
        assert!(registry.resolve(Some("raise")).is_ok());

        match registry.resolve(Some("nope")) {
            Err(CsrfError::UnknownHandler(id)) => assert_eq!(id, "nope"),
            other => panic!("expected UnknownHandler, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_registry_set_default() {
        let mut registry = HandlerRegistry::new();
        registry.set_default("raise");

        let handler = registry.resolve(None).unwrap();
        let result = tokio_test::block_on(handler.error_response(
            &HttpRequest::new("POST", "/"),
            HttpResponse::ok(),
            Rejection::STATUS,
            Rejection::MissingInSession.reason(),
        ));
        assert!(matches!(result, Err(CsrfError::Rejected { .. })));
    }
}
