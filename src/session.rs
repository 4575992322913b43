//! Session store collaborator trait.

use crate::http::HttpRequest;
use async_trait::async_trait;

/// Per-session key/value store, scoped by the request's session identity.
///
/// Storage mechanics (cookie handling, backends, expiry) are entirely the
/// implementor's concern; the middleware only reads and writes a single
/// slot. Implementations must be safe for concurrent per-session access,
/// and are expected to complete without blocking on anything beyond their
/// own backend.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Whether the session bound to `request` holds `key`.
    async fn has(&self, request: &HttpRequest, key: &str) -> bool;

    /// Read the value stored under `key`, if any.
    async fn get(&self, request: &HttpRequest, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, request: &HttpRequest, key: &str, value: String);
}
