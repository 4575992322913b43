use thiserror::Error;

/// The three ways verification can fail.
///
/// All map to the same status code; callers distinguish the kind through
/// the reason string, which is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The session holds no token to compare against.
    MissingInSession,

    /// The request body carries no token.
    MissingInBody,

    /// The submitted token differs from the session-held one.
    NotSame,
}

impl Rejection {
    /// Status code shared by every verification failure.
    pub const STATUS: u16 = 424;

    /// Stable reason string for this failure kind.
    pub fn reason(self) -> &'static str {
        match self {
            Rejection::MissingInSession => "Csrf token is missing within session",
            Rejection::MissingInBody => "Csrf token is missing within body",
            Rejection::NotSame => "Csrf token within body is not the same as in session",
        }
    }
}

#[derive(Error, Debug)]
pub enum CsrfError {
    /// Verification failed and the configured handler raises instead of
    /// answering. Carries the same status/reason the responding variant
    /// would have attached.
    #[error("Csrf verification failed ({status}): {reason}")]
    Rejected { status: u16, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown error handler: {0}")]
    UnknownHandler(String),
}

pub type Result<T> = std::result::Result<T, CsrfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(
            Rejection::MissingInSession.reason(),
            "Csrf token is missing within session"
        );
        assert_eq!(
            Rejection::MissingInBody.reason(),
            "Csrf token is missing within body"
        );
        assert_eq!(
            Rejection::NotSame.reason(),
            "Csrf token within body is not the same as in session"
        );
    }

    #[test]
    fn test_rejection_status() {
        assert_eq!(Rejection::STATUS, 424);
    }

    #[test]
    fn test_rejected_error_display() {
        let err = CsrfError::Rejected {
            status: Rejection::STATUS,
            reason: Rejection::NotSame.reason().to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("424"));
        assert!(message.contains("not the same"));
    }
}
