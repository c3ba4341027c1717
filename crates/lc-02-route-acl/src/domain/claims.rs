//! Session claims carried in the `Authorization` cookie.
//!
//! The cookie holds a JWT minted by the identity gateway. When a signing
//! secret is configured the HS256 signature is verified; otherwise the
//! payload is read as-is.

use crate::error::AclError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use shared_types::{Role, Viewer};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "Authorization";

/// Claims the portal reads from the session token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionClaims {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl SessionClaims {
    pub fn viewer(&self) -> Viewer {
        Viewer {
            uid: self.uid.clone(),
            role: self.role,
        }
    }
}

/// Decodes session tokens.
#[derive(Clone)]
pub struct ClaimsDecoder {
    key: DecodingKey,
    validation: Validation,
    verified: bool,
}

impl ClaimsDecoder {
    /// Verify HS256 signatures with `secret`. `exp` is checked when present.
    pub fn verifying(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
            verified: true,
        }
    }

    /// Read the payload without checking the signature or expiry.
    pub fn unverified() -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        Self {
            key: DecodingKey::from_secret(&[]),
            validation,
            verified: false,
        }
    }

    /// Verifying decoder when a secret is given, unverified otherwise.
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(secret) if !secret.is_empty() => Self::verifying(secret.as_bytes()),
            _ => Self::unverified(),
        }
    }

    pub fn is_verifying(&self) -> bool {
        self.verified
    }

    pub fn decode(&self, token: &str) -> Result<SessionClaims, AclError> {
        decode::<SessionClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(AclError::Token)
    }
}

impl std::fmt::Debug for ClaimsDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimsDecoder")
            .field("verified", &self.verified)
            .finish_non_exhaustive()
    }
}

/// Value of the session cookie in a `Cookie` header, if the cookie is set.
///
/// A present but empty cookie still counts as a session.
pub fn session_token(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name.trim() == SESSION_COOKIE).then(|| value.trim())
    })
}
