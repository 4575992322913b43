use crate::config::CsrfConfig;
use crate::error::{Rejection, Result};
use crate::generator::{RandomTokenGenerator, TokenGenerator};
use crate::handler::{CsrfErrorHandler, HandlerRegistry};
use crate::http::{HttpRequest, HttpResponse};
use crate::observer::{CsrfObserver, NullObserver};
use crate::session::SessionStore;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for the next handler in the middleware chain
pub type Next = Box<
    dyn FnOnce(
            HttpRequest,
            HttpResponse,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send>>
        + Send,
>;

/// CSRF protection middleware
///
/// Seeds a per-session anti-forgery token, verifies unsafe-method requests
/// against it, and rotates the token on every failed check before handing
/// the failure to the configured [`CsrfErrorHandler`]. Holds only shared
/// immutable collaborators, so clones are cheap and a single instance can
/// serve concurrent in-flight requests.
#[derive(Clone)]
pub struct CsrfMiddleware {
    config: Arc<CsrfConfig>,
    generator: Arc<dyn TokenGenerator>,
    session: Arc<dyn SessionStore>,
    handler: Arc<dyn CsrfErrorHandler>,
    observer: Arc<dyn CsrfObserver>,
}

impl CsrfMiddleware {
    /// Create middleware with an explicit error handler.
    pub fn new(
        config: CsrfConfig,
        session: Arc<dyn SessionStore>,
        handler: Arc<dyn CsrfErrorHandler>,
    ) -> Self {
        let generator = Arc::new(RandomTokenGenerator::new(config.entropy_bits));
        Self {
            config: Arc::new(config),
            generator,
            session,
            handler,
            observer: Arc::new(NullObserver),
        }
    }

    /// Create middleware resolving the error handler from a registry by the
    /// configured id.
    pub fn from_registry(
        config: CsrfConfig,
        session: Arc<dyn SessionStore>,
        registry: &HandlerRegistry,
    ) -> Result<Self> {
        let handler = registry.resolve(config.error_handler.as_deref())?;
        Ok(Self::new(config, session, handler))
    }

    /// Replace the token generator.
    pub fn with_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Attach an observer to the four decision points.
    pub fn with_observer(mut self, observer: Arc<dyn CsrfObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Whether the request's method is in the unsafe set.
    pub fn needs_verification(&self, request: &HttpRequest) -> bool {
        self.config.unsafe_methods.iter().any(|m| m == &request.method)
    }

    /// Process one request.
    ///
    /// Verification, including any session mutation it causes, completes
    /// strictly before `next` is invoked. With no `next` the response is
    /// returned unchanged. At most one session write happens per call:
    /// a seed when the slot was empty, or a rotation when verification
    /// failed; a passing check against an existing token writes nothing.
    pub async fn handle(
        &self,
        request: HttpRequest,
        response: HttpResponse,
        next: Option<Next>,
    ) -> Result<HttpResponse> {
        if self.needs_verification(&request) {
            self.observer.check_started(&request);
            if let Err(rejection) = self.verify(&request).await {
                return self.reject(&request, response, rejection).await;
            }
        }

        if !self.session.has(&request, &self.config.session_key).await {
            self.observer.token_seeded(&request);
            self.session
                .set(&request, &self.config.session_key, self.generator.generate())
                .await;
        }

        self.observer.passed(&request);
        match next {
            Some(next) => next(request, response).await,
            None => Ok(response),
        }
    }

    async fn verify(&self, request: &HttpRequest) -> std::result::Result<(), Rejection> {
        let key = &self.config.session_key;

        if !self.session.has(request, key).await {
            return Err(Rejection::MissingInSession);
        }

        let Some(submitted) = request.body_field(key) else {
            return Err(Rejection::MissingInBody);
        };

        // A store answering `has` but not `get` is treated as a mismatch;
        // the rejection path rotates the slot either way.
        match self.session.get(request, key).await {
            Some(stored) if stored == submitted => Ok(()),
            _ => Err(Rejection::NotSame),
        }
    }

    /// Rotate the session token, then hand the failure to the error handler.
    async fn reject(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
        rejection: Rejection,
    ) -> Result<HttpResponse> {
        let reason = rejection.reason();
        self.observer.rejected(request, Rejection::STATUS, reason);
        self.session
            .set(request, &self.config.session_key, self.generator.generate())
            .await;
        self.handler
            .error_response(request, response, Rejection::STATUS, reason)
            .await
    }
}
