use crate::algorithm::{self, AlgorithmId};
use crate::claims::Claims;
use crate::crypto::{CryptoProvider, DefaultCrypto};
use crate::error::{Error, Result};
use crate::keys::KeyProvider;
use crate::limits::MAX_CLOCK_SKEW_SECONDS;
use crate::token::{ParsedToken, VerifiedToken};
use crate::utils::time::now_seconds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Expectations a [`TokenVerifier`] enforces
///
/// Loadable from any serde format; unset fields keep their defaults.
///
/// ```
/// use jwtkit::{AlgorithmId, VerifierConfig};
///
/// let config: VerifierConfig = serde_json::from_str(
///     r#"{"algorithm":"EC256","issuer":"auth.example.com","clock_skew_seconds":30}"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.algorithm, Some(AlgorithmId::EC256));
/// assert!(!config.require_id);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    /// Algorithm the `alg` header must name
    pub algorithm: Option<AlgorithmId>,

    /// Required `iss` value
    pub issuer: Option<String>,

    /// Required `aud` value
    pub audience: Option<String>,

    /// Required `sub` value
    pub subject: Option<String>,

    /// Reject tokens without `iat`
    pub require_timestamp: bool,

    /// Reject tokens without `jti`
    pub require_id: bool,

    /// Leeway for `exp` and `nbf` (at most 300)
    pub clock_skew_seconds: u64,
}

/// Builder for [`TokenVerifier`]
pub struct VerifierBuilder<K: KeyProvider> {
    key_provider: K,
    config: VerifierConfig,
    crypto: Arc<dyn CryptoProvider>,
}

impl<K: KeyProvider> VerifierBuilder<K> {
    /// Only accept tokens whose `alg` is `algorithm`
    ///
    /// Must agree with the key provider's declared algorithm, if it has one.
    pub fn expect_algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.config.algorithm = Some(algorithm);
        self
    }

    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.config.issuer = Some(issuer.into());
        self
    }

    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.config.audience = Some(audience.into());
        self
    }

    pub fn expect_subject(mut self, subject: impl Into<String>) -> Self {
        self.config.subject = Some(subject.into());
        self
    }

    /// Require the `iat` claim
    pub fn require_timestamp_claim(mut self, required: bool) -> Self {
        self.config.require_timestamp = required;
        self
    }

    /// Require the `jti` claim
    pub fn require_id_claim(mut self, required: bool) -> Self {
        self.config.require_id = required;
        self
    }

    /// Tolerance in seconds applied to `exp` and `nbf`
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.config.clock_skew_seconds = seconds;
        self
    }

    /// Use a custom crypto backend
    pub fn with_crypto(mut self, crypto: Arc<dyn CryptoProvider>) -> Self {
        self.crypto = crypto;
        self
    }

    /// Replace every expectation at once
    pub fn config(mut self, config: VerifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and freeze it
    pub fn build(self) -> Result<TokenVerifier<K>> {
        if self.config.clock_skew_seconds > MAX_CLOCK_SKEW_SECONDS {
            return Err(Error::InvalidConfiguration(format!(
                "clock skew of {} seconds exceeds the maximum of {} seconds",
                self.config.clock_skew_seconds, MAX_CLOCK_SKEW_SECONDS
            )));
        }

        if let (Some(expected), Some(declared)) =
            (self.config.algorithm, self.key_provider.declared_algorithm())
        {
            if expected != declared {
                return Err(Error::InvalidConfiguration(format!(
                    "expected algorithm {expected} conflicts with the key provider's declared {declared}"
                )));
            }
        }

        Ok(TokenVerifier {
            key_provider: self.key_provider,
            config: self.config,
            crypto: self.crypto,
        })
    }
}

/// Validates compact tokens against a fixed configuration
///
/// Immutable once built, so a single verifier can be shared across threads.
///
/// ```
/// use jwtkit::{AlgorithmId, Claims, ErrorKind, SharedSecret, TokenSigner, TokenVerifier};
///
/// let keys = SharedSecret::new(b"secret".to_vec());
/// let token = TokenSigner::new(&keys)
///     .set_algorithm(AlgorithmId::HS256)
///     .payload(Claims::new().set_issuer("auth.example.com").set_expiration_at(2_000))
///     .compact()
///     .unwrap();
///
/// let verifier = TokenVerifier::builder(&keys)
///     .expect_algorithm(AlgorithmId::HS256)
///     .expect_issuer("auth.example.com")
///     .build()
///     .unwrap();
///
/// let verified = verifier.verify_at(&token, 1_000).unwrap();
/// assert_eq!(verified.payload().issuer(), Some("auth.example.com"));
///
/// let expired = verifier.verify_at(&token, 3_000).unwrap_err();
/// assert_eq!(expired.kind(), ErrorKind::TokenExpired);
/// ```
#[derive(Clone)]
pub struct TokenVerifier<K: KeyProvider> {
    key_provider: K,
    config: VerifierConfig,
    crypto: Arc<dyn CryptoProvider>,
}

impl<K: KeyProvider> TokenVerifier<K> {
    /// Start configuring a verifier for keys from `key_provider`
    pub fn builder(key_provider: K) -> VerifierBuilder<K> {
        VerifierBuilder {
            key_provider,
            config: VerifierConfig::default(),
            crypto: Arc::new(DefaultCrypto),
        }
    }

    /// The frozen configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify a token against the system clock
    pub fn verify(&self, token: &str) -> Result<VerifiedToken> {
        self.verify_at(token, now_seconds())
    }

    /// Verify a token as of `now` (seconds since the Unix epoch)
    ///
    /// Checks run in a fixed order and the first failure is returned.
    /// Nothing from the payload is read before the signature is verified.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<VerifiedToken> {
        // 1-2. Split and decode header
        let parsed = ParsedToken::parse(token).map_err(|e| reject("parse", e))?;

        // 3-4. Resolve algorithm
        let alg = parsed.header().algorithm().ok_or_else(|| {
            reject(
                "algorithm",
                Error::MissingAlgorithm("header has no 'alg' claim".to_string()),
            )
        })?;
        let algorithm = algorithm::resolve(alg).map_err(|e| reject("algorithm", e))?;

        // 5-6. Verify signature
        let signature = parsed
            .decode_signature()
            .map_err(|e| reject("signature", e))?;
        if !self.crypto.verify(
            &algorithm,
            self.key_provider.verify_key(),
            parsed.signing_input().as_bytes(),
            &signature,
        ) {
            return Err(reject(
                "signature",
                Error::SignatureInvalid(format!(
                    "{} signature does not match",
                    algorithm.id()
                )),
            ));
        }

        // 7. Algorithm pinning
        let expected = self
            .config
            .algorithm
            .or_else(|| self.key_provider.declared_algorithm());
        if let Some(expected) = expected {
            if expected != algorithm.id() {
                return Err(reject(
                    "algorithm pinning",
                    Error::AlgorithmMismatch(format!(
                        "expected {expected}, token uses {}",
                        algorithm.id()
                    )),
                ));
            }
        }

        // 8. Decode payload
        let payload = parsed.decode_payload().map_err(|e| reject("payload", e))?;

        // 9-14. Claims
        self.validate_claims(&payload, now)
            .map_err(|e| reject("claims", e))?;

        Ok(VerifiedToken::new(parsed.into_header(), payload))
    }

    fn validate_claims(&self, payload: &Claims, now: i64) -> Result<()> {
        let now = i128::from(now);
        let skew = i128::from(self.config.clock_skew_seconds);

        if let Some(exp) = payload.expiration() {
            if now > i128::from(exp) + skew {
                return Err(Error::TokenExpired(format!(
                    "expired at {exp} (leeway {skew}s)"
                )));
            }
        }

        if let Some(nbf) = payload.not_before() {
            if now < i128::from(nbf) - skew {
                return Err(Error::TokenNotYetValid(format!(
                    "not valid before {nbf} (leeway {skew}s)"
                )));
            }
        }

        if let Some(expected) = &self.config.issuer {
            check_equal("iss", expected, payload.issuer()).map_err(Error::IssuerMismatch)?;
        }
        if let Some(expected) = &self.config.audience {
            check_equal("aud", expected, payload.audience()).map_err(Error::AudienceMismatch)?;
        }
        if let Some(expected) = &self.config.subject {
            check_equal("sub", expected, payload.subject()).map_err(Error::SubjectMismatch)?;
        }

        if self.config.require_timestamp && payload.issued_at().is_none() {
            return Err(Error::MissingTimestampClaim(
                "token has no 'iat' claim".to_string(),
            ));
        }

        if self.config.require_id && payload.jwt_id().is_none() {
            return Err(Error::MissingIdClaim("token has no 'jti' claim".to_string()));
        }

        Ok(())
    }
}

impl<K: KeyProvider> fmt::Debug for TokenVerifier<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Compare a claim with its expected value; the reason never echoes the token's value
fn check_equal(
    name: &str,
    expected: &str,
    actual: Option<&str>,
) -> std::result::Result<(), String> {
    match actual {
        Some(actual) if actual == expected => Ok(()),
        Some(_) => Err(format!("'{name}' does not match expected '{expected}'")),
        None => Err(format!("token has no '{name}' claim, expected '{expected}'")),
    }
}

fn reject(step: &'static str, error: Error) -> Error {
    debug!(step, kind = ?error.kind(), "token rejected");
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::SharedSecret;
    use crate::token::TokenSigner;
    use crate::utils::base64url;

    const SECRET: &[u8] = b"unit-test-secret";

    fn keys() -> SharedSecret {
        SharedSecret::new(SECRET.to_vec())
    }

    fn sign(payload: Claims) -> String {
        TokenSigner::new(&keys())
            .set_algorithm(AlgorithmId::HS256)
            .payload(payload)
            .compact()
            .unwrap()
    }

    #[test]
    fn test_clock_skew_cap() {
        assert!(TokenVerifier::builder(keys()).clock_skew(300).build().is_ok());
        assert!(matches!(
            TokenVerifier::builder(keys()).clock_skew(301).build(),
            Err(Error::InvalidConfiguration(_))
        ));
        let config = VerifierConfig {
            clock_skew_seconds: 3600,
            ..Default::default()
        };
        assert!(matches!(
            TokenVerifier::builder(keys()).config(config).build(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_expected_algorithm_must_match_declared() {
        let declared = keys().with_algorithm(AlgorithmId::HS256);
        assert!(matches!(
            TokenVerifier::builder(&declared)
                .expect_algorithm(AlgorithmId::KS256)
                .build(),
            Err(Error::InvalidConfiguration(_))
        ));

        let config = VerifierConfig {
            algorithm: Some(AlgorithmId::KS256),
            ..Default::default()
        };
        assert!(matches!(
            TokenVerifier::builder(&declared).config(config).build(),
            Err(Error::InvalidConfiguration(_))
        ));

        assert!(TokenVerifier::builder(&declared)
            .expect_algorithm(AlgorithmId::HS256)
            .build()
            .is_ok());
    }

    #[test]
    fn test_builder_and_config_agree() {
        let built = TokenVerifier::builder(keys())
            .expect_algorithm(AlgorithmId::KS256)
            .expect_issuer("iss")
            .expect_audience("aud")
            .expect_subject("sub")
            .require_timestamp_claim(true)
            .require_id_claim(true)
            .clock_skew(10)
            .build()
            .unwrap();

        let config: VerifierConfig = serde_json::from_str(
            r#"{
                "algorithm": "KS256",
                "issuer": "iss",
                "audience": "aud",
                "subject": "sub",
                "require_timestamp": true,
                "require_id": true,
                "clock_skew_seconds": 10
            }"#,
        )
        .unwrap();

        assert_eq!(built.config(), &config);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(serde_json::from_str::<VerifierConfig>(r#"{"isuer":"typo"}"#).is_err());
        assert!(serde_json::from_str::<VerifierConfig>(r#"{"algorithm":"none"}"#).is_err());
    }

    #[test]
    fn test_default_accepts_unconstrained_token() {
        let token = sign(Claims::new());
        let verifier = TokenVerifier::builder(keys()).build().unwrap();
        let verified = verifier.verify(&token).unwrap();
        assert_eq!(verified.header().algorithm(), Some("HS256"));
        assert_eq!(verified.payload(), &Claims::new());
    }

    #[test]
    fn test_skew_widens_both_bounds() {
        let token = sign(Claims::new().set_expiration_at(100).set_not_before_at(200));
        let verifier = TokenVerifier::builder(keys()).clock_skew(60).build().unwrap();

        // window without skew is empty; with 60s skew it is [140, 160]
        assert!(verifier.verify_at(&token, 150).is_ok());
        assert!(matches!(
            verifier.verify_at(&token, 139),
            Err(Error::TokenNotYetValid(_))
        ));
        assert!(matches!(
            verifier.verify_at(&token, 161),
            Err(Error::TokenExpired(_))
        ));
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let token = sign(
            Claims::new()
                .set_expiration_at(i64::MAX)
                .set_not_before_at(i64::MIN),
        );
        let verifier = TokenVerifier::builder(keys()).clock_skew(300).build().unwrap();
        assert!(verifier.verify_at(&token, 0).is_ok());
        assert!(verifier.verify_at(&token, i64::MAX).is_ok());
        assert!(verifier.verify_at(&token, i64::MIN).is_ok());
    }

    #[test]
    fn test_mismatch_reason_hides_token_value() {
        let token = sign(Claims::new().set_issuer("attacker-controlled"));
        let verifier = TokenVerifier::builder(keys())
            .expect_issuer("trusted")
            .build()
            .unwrap();
        let err = verifier.verify_at(&token, 0).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::IssuerMismatch);
        assert!(err.reason().contains("trusted"));
        assert!(!err.reason().contains("attacker"));
    }

    #[test]
    fn test_payload_not_read_before_signature() {
        // payload is not base64url, signature is wrong: signature check must win
        let header = base64url::encode(r#"{"alg":"HS256"}"#);
        let token = format!("{header}.!!!.AAAA");
        let verifier = TokenVerifier::builder(keys()).build().unwrap();
        assert!(matches!(
            verifier.verify_at(&token, 0),
            Err(Error::SignatureInvalid(_))
        ));
    }

    #[test]
    fn test_verifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokenVerifier<SharedSecret>>();
        assert_send_sync::<TokenVerifier<Arc<SharedSecret>>>();
    }
}
