mod numeric_date;

use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use crate::utils::time::{now_seconds, offset_seconds};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Names of the claims with a dedicated typed field
pub const RESERVED_CLAIMS: [&str; 9] = [
    "typ", "alg", "iss", "aud", "sub", "exp", "nbf", "iat", "jti",
];

/// A set of token claims
///
/// The same type carries both the header (`typ`, `alg`, plus any extension
/// header such as `kid`) and the payload. Reserved claims live in typed
/// fields; everything else is kept in an ordered extension map and survives a
/// decode/encode cycle untouched.
///
/// Setters take `self` by value so they chain:
///
/// ```
/// use jwtkit::Claims;
/// use std::time::Duration;
///
/// let payload = Claims::new()
///     .set_issuer("auth.example.com")
///     .set_subject("user-42")
///     .set_expiration(Duration::from_secs(3600))
///     .set_issued_now();
///
/// assert_eq!(payload.issuer(), Some("auth.example.com"));
/// assert!(payload.expiration().is_some());
/// ```
///
/// Setters never check semantics. Whether a token is expired, addressed to
/// the right audience, etc. is decided by [`TokenVerifier`](crate::TokenVerifier).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Type (typ)
    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    token_type: Option<String>,

    /// Algorithm (alg), kept as the raw wire string
    #[serde(rename = "alg", default, skip_serializing_if = "Option::is_none")]
    algorithm: Option<String>,

    /// Issuer (iss)
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    issuer: Option<String>,

    /// Audience (aud)
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    audience: Option<String>,

    /// Subject (sub)
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    subject: Option<String>,

    /// Expiration Time (exp), seconds since the Unix epoch
    #[serde(
        rename = "exp",
        default,
        deserialize_with = "numeric_date::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    expiration: Option<i64>,

    /// Not Before (nbf), seconds since the Unix epoch
    #[serde(
        rename = "nbf",
        default,
        deserialize_with = "numeric_date::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    not_before: Option<i64>,

    /// Issued At (iat), seconds since the Unix epoch
    #[serde(
        rename = "iat",
        default,
        deserialize_with = "numeric_date::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    issued_at: Option<i64>,

    /// JWT ID (jti)
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    jwt_id: Option<String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Claims {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================================
    // typ
    // ============================================================================

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn set_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = Some(token_type.into());
        self
    }

    pub fn clear_token_type(mut self) -> Self {
        self.token_type = None;
        self
    }

    // ============================================================================
    // alg
    // ============================================================================

    /// Raw `alg` value, which may name an algorithm outside the catalog
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    /// `alg` as a catalog identifier, `None` if absent or unknown
    pub fn algorithm_id(&self) -> Option<AlgorithmId> {
        self.algorithm
            .as_deref()
            .and_then(|alg| AlgorithmId::from_str(alg).ok())
    }

    pub fn set_algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = Some(algorithm.as_str().to_string());
        self
    }

    pub fn clear_algorithm(mut self) -> Self {
        self.algorithm = None;
        self
    }

    // ============================================================================
    // iss / aud / sub / jti
    // ============================================================================

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    pub fn set_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn clear_issuer(mut self) -> Self {
        self.issuer = None;
        self
    }

    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    pub fn set_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn clear_audience(mut self) -> Self {
        self.audience = None;
        self
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn set_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn clear_subject(mut self) -> Self {
        self.subject = None;
        self
    }

    pub fn jwt_id(&self) -> Option<&str> {
        self.jwt_id.as_deref()
    }

    pub fn set_jwt_id(mut self, jwt_id: impl Into<String>) -> Self {
        self.jwt_id = Some(jwt_id.into());
        self
    }

    pub fn clear_jwt_id(mut self) -> Self {
        self.jwt_id = None;
        self
    }

    // ============================================================================
    // exp / nbf / iat
    // ============================================================================

    pub fn expiration(&self) -> Option<i64> {
        self.expiration
    }

    /// Expire `lifetime` from now
    pub fn set_expiration(mut self, lifetime: Duration) -> Self {
        let now = now_seconds();
        self.expiration = Some(now.saturating_add(offset_seconds(lifetime.as_secs())));
        self
    }

    /// Expire at an absolute instant (seconds since the Unix epoch)
    pub fn set_expiration_at(mut self, seconds: i64) -> Self {
        self.expiration = Some(seconds);
        self
    }

    pub fn clear_expiration(mut self) -> Self {
        self.expiration = None;
        self
    }

    pub fn not_before(&self) -> Option<i64> {
        self.not_before
    }

    /// Set `nbf` to `offset` before now
    ///
    /// The token is valid from that past instant. Use
    /// [`set_not_before_at`](Self::set_not_before_at) for a future start.
    pub fn set_not_before(mut self, offset: Duration) -> Self {
        let now = now_seconds();
        self.not_before = Some(now.saturating_sub(offset_seconds(offset.as_secs())));
        self
    }

    /// Set `nbf` to an absolute instant (seconds since the Unix epoch)
    pub fn set_not_before_at(mut self, seconds: i64) -> Self {
        self.not_before = Some(seconds);
        self
    }

    pub fn clear_not_before(mut self) -> Self {
        self.not_before = None;
        self
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.issued_at
    }

    pub fn set_issued_at(mut self, seconds: i64) -> Self {
        self.issued_at = Some(seconds);
        self
    }

    pub fn set_issued_now(mut self) -> Self {
        self.issued_at = Some(now_seconds());
        self
    }

    pub fn clear_issued_at(mut self) -> Self {
        self.issued_at = None;
        self
    }

    // ============================================================================
    // Extension claims
    // ============================================================================

    /// Look up any claim by name
    ///
    /// Reserved claims are read from their typed field.
    pub fn claim(&self, name: &str) -> Option<Value> {
        match name {
            "typ" => self.token_type.clone().map(Value::String),
            "alg" => self.algorithm.clone().map(Value::String),
            "iss" => self.issuer.clone().map(Value::String),
            "aud" => self.audience.clone().map(Value::String),
            "sub" => self.subject.clone().map(Value::String),
            "jti" => self.jwt_id.clone().map(Value::String),
            "exp" => self.expiration.map(Value::from),
            "nbf" => self.not_before.map(Value::from),
            "iat" => self.issued_at.map(Value::from),
            _ => self.extra.get(name).cloned(),
        }
    }

    /// Set any claim by name
    ///
    /// Reserved names are routed to their typed field and must carry the
    /// matching JSON type (string, or whole-second number for `exp`, `nbf`
    /// and `iat`). A mismatch fails with [`Error::MalformedToken`].
    pub fn set_claim(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        match name {
            "typ" => self.token_type = Some(expect_string(name, value)?),
            "alg" => self.algorithm = Some(expect_string(name, value)?),
            "iss" => self.issuer = Some(expect_string(name, value)?),
            "aud" => self.audience = Some(expect_string(name, value)?),
            "sub" => self.subject = Some(expect_string(name, value)?),
            "jti" => self.jwt_id = Some(expect_string(name, value)?),
            "exp" => self.expiration = Some(expect_seconds(name, &value)?),
            "nbf" => self.not_before = Some(expect_seconds(name, &value)?),
            "iat" => self.issued_at = Some(expect_seconds(name, &value)?),
            _ => {
                self.extra.insert(name.to_string(), value);
            }
        }
        Ok(self)
    }

    /// Remove any claim by name
    pub fn clear_claim(mut self, name: &str) -> Self {
        match name {
            "typ" => self.token_type = None,
            "alg" => self.algorithm = None,
            "iss" => self.issuer = None,
            "aud" => self.audience = None,
            "sub" => self.subject = None,
            "jti" => self.jwt_id = None,
            "exp" => self.expiration = None,
            "nbf" => self.not_before = None,
            "iat" => self.issued_at = None,
            _ => {
                self.extra.shift_remove(name);
            }
        }
        self
    }

    /// Extension claims in insertion order
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    // ============================================================================
    // Codec
    // ============================================================================

    /// Encode as compact JSON
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| codec_error("encode", &e))
    }

    /// Decode from JSON
    ///
    /// The input must be a JSON object.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| codec_error("decode", &e))
    }
}

/// serde_json messages can quote offending values, so only the position is kept
fn codec_error(action: &str, e: &serde_json::Error) -> Error {
    Error::MalformedToken(format!(
        "failed to {action} claims: {:?} error at line {} column {}",
        e.classify(),
        e.line(),
        e.column()
    ))
}

fn expect_string(name: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(Error::MalformedToken(format!("claim '{name}' must be a string"))),
    }
}

fn expect_seconds(name: &str, value: &Value) -> Result<i64> {
    numeric_date::from_value(value).ok_or_else(|| {
        Error::MalformedToken(format!(
            "claim '{name}' must be a whole number of seconds"
        ))
    })
}
