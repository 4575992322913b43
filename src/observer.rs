//! Decision-point hooks, kept outside the verification algorithm.

use crate::http::HttpRequest;

/// Receives an event at each of the middleware's four decision points.
///
/// Default methods are no-ops, so implementors override only the points
/// they care about and the algorithm stays testable without a logging
/// subscriber.
pub trait CsrfObserver: Send + Sync {
    /// An unsafe-method request is about to be verified.
    fn check_started(&self, _request: &HttpRequest) {}

    /// A fresh token was written into an empty session slot.
    fn token_seeded(&self, _request: &HttpRequest) {}

    /// Verification failed; the slot has been rotated.
    fn rejected(&self, _request: &HttpRequest, _status: u16, _reason: &str) {}

    /// The request is being forwarded down the chain.
    fn passed(&self, _request: &HttpRequest) {}
}

/// Observer that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl CsrfObserver for NullObserver {}

/// Observer that emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl CsrfObserver for LogObserver {
    fn check_started(&self, request: &HttpRequest) {
        tracing::info!(method = %request.method, path = %request.path, "csrf: check token");
    }

    fn token_seeded(&self, request: &HttpRequest) {
        tracing::info!(path = %request.path, "csrf: set token");
    }

    fn rejected(&self, request: &HttpRequest, status: u16, reason: &str) {
        tracing::error!(
            method = %request.method,
            path = %request.path,
            status,
            reason,
            "csrf: rejected"
        );
    }

    fn passed(&self, request: &HttpRequest) {
        tracing::debug!(path = %request.path, "csrf: pass");
    }
}
