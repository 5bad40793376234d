//! Size limit constants for input validation

/// Maximum length for a compact token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-8192 signatures are 1024 bytes, every other algorithm is smaller
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum length for the algorithm (alg) header value (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum clock skew tolerance (300 seconds = 5 minutes)
pub(crate) const MAX_CLOCK_SKEW_SECONDS: u64 = 300;

/// Largest integer a binary64 float represents exactly (2^53)
pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;
