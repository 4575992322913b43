use crate::error::{CsrfError, Result};

/// CSRF protection configuration
#[derive(Debug, Clone)]
pub struct CsrfConfig {
    /// Bits of entropy per generated token
    pub entropy_bits: u32,

    /// Session slot and body field the token lives under
    pub session_key: String,

    /// Methods that must present a valid token
    pub unsafe_methods: Vec<String>,

    /// Registry id of the error handler to use (None = registry default)
    pub error_handler: Option<String>,
}

impl CsrfConfig {
    /// Create a configuration with the given token entropy.
    ///
    /// `entropy_bits` must be a positive multiple of 8; 128 or more is
    /// recommended for collision resistance over an application's lifetime.
    pub fn new(entropy_bits: u32) -> Result<Self> {
        if entropy_bits == 0 || entropy_bits % 8 != 0 {
            return Err(CsrfError::Config(format!(
                "token entropy must be a positive multiple of 8 bits, got {entropy_bits}"
            )));
        }

        Ok(Self {
            entropy_bits,
            session_key: "csrf".to_string(),
            unsafe_methods: vec![
                "POST".to_string(),
                "PUT".to_string(),
                "DELETE".to_string(),
                "PATCH".to_string(),
            ],
            error_handler: None,
        })
    }

    /// Set the session slot / body field name
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    /// Replace the set of methods that require verification
    pub fn with_unsafe_methods(mut self, methods: Vec<String>) -> Self {
        self.unsafe_methods = methods;
        self
    }

    /// Select a named error handler from the registry
    pub fn with_error_handler(mut self, id: impl Into<String>) -> Self {
        self.error_handler = Some(id.into());
        self
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self::new(256).unwrap()
    }
}
