//! # CSRF Guard
//!
//! Session-backed Cross-Site Request Forgery (CSRF) protection middleware.
//!
//! ## Features
//!
//! - ✅ **Synchronizer token pattern** - one opaque token per session
//! - ✅ **Token rotation** - a fresh token is issued on every failed check
//! - ✅ **Pluggable failure outcome** - answer with 424 or raise a structured error
//! - ✅ **Narrow collaborators** - session store, token generator, error handler traits
//! - ✅ **Observer hooks** - structured logging kept out of the core algorithm
//!
//! ## Quick Start
//!
//! ```rust
//! use csrf_guard::{CsrfConfig, RandomTokenGenerator, TokenGenerator};
//!
//! // Default configuration: 256-bit tokens under the "csrf" session key
//! let config = CsrfConfig::default();
//! assert_eq!(config.entropy_bits, 256);
//! assert_eq!(config.session_key, "csrf");
//!
//! // Or tuned
//! let config = CsrfConfig::new(128).unwrap()
//!     .with_session_key("xsrf")
//!     .with_error_handler("raise");
//! assert_eq!(config.error_handler.as_deref(), Some("raise"));
//!
//! // Tokens have a fixed length for a given entropy
//! let generator = RandomTokenGenerator::new(256);
//! assert_eq!(generator.generate().len(), 43);
//! ```
//!
//! ## Protecting a chain
//!
//! ```ignore
//! use csrf_guard::{CsrfConfig, CsrfMiddleware, RespondOnFailure};
//! use std::sync::Arc;
//!
//! let middleware = CsrfMiddleware::new(
//!     CsrfConfig::default(),
//!     session_store,                 // Arc<dyn SessionStore>
//!     Arc::new(RespondOnFailure),
//! );
//!
//! // Per request
//! let response = middleware.handle(request, response, Some(next)).await?;
//! ```
//!
//! Unsafe methods (POST, PUT, DELETE, PATCH) must carry a `csrf` field in
//! the request body matching the session-held token; everything else passes
//! through untouched. A missing or mismatched token answers with status 424
//! and one of three stable reason strings, and the session token is rotated
//! so an observed value cannot be replayed after a failed attempt.

pub mod config;
pub mod error;
pub mod generator;
pub mod handler;
pub mod http;
pub mod middleware;
pub mod observer;
pub mod session;

pub use config::CsrfConfig;
pub use error::{CsrfError, Rejection, Result};
pub use generator::{RandomTokenGenerator, TokenGenerator};
pub use handler::{CsrfErrorHandler, HandlerRegistry, RaiseOnFailure, RespondOnFailure};
pub use http::{HttpRequest, HttpResponse};
pub use middleware::{CsrfMiddleware, Next};
pub use observer::{CsrfObserver, LogObserver, NullObserver};
pub use session::SessionStore;
