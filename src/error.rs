//! Errors for jwtkit
//!
//! Every failure inside [`TokenSigner::compact`](crate::TokenSigner::compact) or
//! [`TokenVerifier::verify`](crate::TokenVerifier::verify) surfaces as exactly one
//! variant of [`Error`]. Reasons never carry claim values read from a token or
//! any key material.

use thiserror::Error;

/// jwtkit Errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Missing algorithm: {0}")]
    MissingAlgorithm(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Algorithm mismatch: {0}")]
    AlgorithmMismatch(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed: {0}")]
    SignatureInvalid(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("Token expired: {0}")]
    TokenExpired(String),

    #[error("Token not yet valid: {0}")]
    TokenNotYetValid(String),

    #[error("Issuer mismatch: {0}")]
    IssuerMismatch(String),

    #[error("Audience mismatch: {0}")]
    AudienceMismatch(String),

    #[error("Subject mismatch: {0}")]
    SubjectMismatch(String),

    #[error("Missing timestamp claim: {0}")]
    MissingTimestampClaim(String),

    #[error("Missing id claim: {0}")]
    MissingIdClaim(String),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Fieldless discriminant of [`Error`], for branching and logging on cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedToken,
    MissingAlgorithm,
    UnsupportedAlgorithm,
    AlgorithmMismatch,
    SignatureInvalid,
    SigningFailed,
    TokenExpired,
    TokenNotYetValid,
    IssuerMismatch,
    AudienceMismatch,
    SubjectMismatch,
    MissingTimestampClaim,
    MissingIdClaim,
    InvalidConfiguration,
}

impl Error {
    /// The kind of failure, without its reason
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedToken(_) => ErrorKind::MalformedToken,
            Error::MissingAlgorithm(_) => ErrorKind::MissingAlgorithm,
            Error::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Error::AlgorithmMismatch(_) => ErrorKind::AlgorithmMismatch,
            Error::SignatureInvalid(_) => ErrorKind::SignatureInvalid,
            Error::SigningFailed(_) => ErrorKind::SigningFailed,
            Error::TokenExpired(_) => ErrorKind::TokenExpired,
            Error::TokenNotYetValid(_) => ErrorKind::TokenNotYetValid,
            Error::IssuerMismatch(_) => ErrorKind::IssuerMismatch,
            Error::AudienceMismatch(_) => ErrorKind::AudienceMismatch,
            Error::SubjectMismatch(_) => ErrorKind::SubjectMismatch,
            Error::MissingTimestampClaim(_) => ErrorKind::MissingTimestampClaim,
            Error::MissingIdClaim(_) => ErrorKind::MissingIdClaim,
            Error::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
        }
    }

    /// The human-readable reason attached to this error
    pub fn reason(&self) -> &str {
        match self {
            Error::MalformedToken(reason)
            | Error::MissingAlgorithm(reason)
            | Error::UnsupportedAlgorithm(reason)
            | Error::AlgorithmMismatch(reason)
            | Error::SignatureInvalid(reason)
            | Error::SigningFailed(reason)
            | Error::TokenExpired(reason)
            | Error::TokenNotYetValid(reason)
            | Error::IssuerMismatch(reason)
            | Error::AudienceMismatch(reason)
            | Error::SubjectMismatch(reason)
            | Error::MissingTimestampClaim(reason)
            | Error::MissingIdClaim(reason)
            | Error::InvalidConfiguration(reason) => reason,
        }
    }
}

/// Result type alias for jwtkit operations
pub type Result<T> = std::result::Result<T, Error>;
