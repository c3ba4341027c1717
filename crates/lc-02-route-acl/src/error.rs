//! Route ACL errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AclError {
    /// A rule pattern could not be compiled.
    #[error("invalid route pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: matchit::InsertError,
    },

    /// The session token could not be decoded or verified.
    #[error("invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
