//! Session token verification.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use bazaar_core::config::AuthConfig;
use bazaar_core::error::AppError;

use super::claims::Claims;

/// Why a token failed verification.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Bad signature, malformed structure, or unexpected claims.
    #[error("invalid token")]
    Invalid,
    /// Signature is fine but `exp` has passed.
    #[error("token expired")]
    Expired,
    /// Anything else the verifier reports; not a caller mistake.
    #[error("token verification fault: {0}")]
    Fault(#[source] jsonwebtoken::errors::Error),
}

/// Verifies HS256 session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let secret = super::signing_secret(config)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // iat is already backdated at issuance
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Verifies signature and expiry, returning the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => DecodeError::Expired,
                JwtErrorKind::InvalidToken
                | JwtErrorKind::InvalidSignature
                | JwtErrorKind::InvalidAlgorithm
                | JwtErrorKind::ImmatureSignature
                | JwtErrorKind::MissingRequiredClaim(_)
                | JwtErrorKind::Base64(_)
                | JwtErrorKind::Json(_)
                | JwtErrorKind::Utf8(_) => DecodeError::Invalid,
                _ => DecodeError::Fault(e),
            })
    }
}
