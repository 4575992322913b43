use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Produces opaque anti-forgery tokens.
///
/// Implementations must always succeed: an exhausted entropy source is not
/// a recoverable condition and should abort the request rather than return.
/// Tokens are compared byte-for-byte only, so any internal structure is
/// invisible to the middleware.
pub trait TokenGenerator: Send + Sync {
    /// Produce a fresh token. Every call must yield a value with no
    /// practical collision probability and a length constant for the
    /// generator's configuration.
    fn generate(&self) -> String;
}

/// Default generator: CSPRNG bytes rendered as base64url without padding.
///
/// At the default 256 bits of entropy every token is 43 characters long.
#[derive(Debug, Clone)]
pub struct RandomTokenGenerator {
    entropy_bytes: usize,
}

impl RandomTokenGenerator {
    /// Create a generator drawing `entropy_bits` of randomness per token.
    ///
    /// Widths are validated by [`CsrfConfig::new`](crate::CsrfConfig::new);
    /// bits that are not a multiple of 8 are truncated here.
    pub fn new(entropy_bits: u32) -> Self {
        Self {
            entropy_bytes: (entropy_bits / 8) as usize,
        }
    }

    /// Length of every token this generator emits.
    pub fn token_length(&self) -> usize {
        (self.entropy_bytes * 4).div_ceil(3)
    }
}

impl Default for RandomTokenGenerator {
    fn default() -> Self {
        Self::new(256)
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        // thread_rng is a CSPRNG; it panics if the OS entropy source fails,
        // which is the required fatal behavior.
        let mut bytes = vec![0u8; self.entropy_bytes];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_token_length() {
        let generator = RandomTokenGenerator::default();
        assert_eq!(generator.token_length(), 43);
        assert_eq!(generator.generate().len(), 43);
    }

    #[test]
    fn test_length_scales_with_entropy() {
        assert_eq!(RandomTokenGenerator::new(128).token_length(), 22);
        assert_eq!(RandomTokenGenerator::new(128).generate().len(), 22);
        assert_eq!(RandomTokenGenerator::new(256).token_length(), 43);
    }

    #[test]
    fn test_tokens_are_url_safe() {
        let token = RandomTokenGenerator::default().generate();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        let generator = RandomTokenGenerator::default();
        let a = generator.generate();
        let b = generator.generate();
        assert_ne!(a, b);
    }
}
