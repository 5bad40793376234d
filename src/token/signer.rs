use crate::algorithm::{self, AlgorithmId};
use crate::claims::Claims;
use crate::crypto::{CryptoProvider, DefaultCrypto};
use crate::error::{Error, Result};
use crate::keys::KeyProvider;
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::utils::base64url;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::trace;

/// Assembles and signs compact tokens
///
/// ```
/// use jwtkit::{AlgorithmId, Claims, SharedSecret, TokenSigner};
///
/// let keys = SharedSecret::new(b"secret".to_vec());
/// let token = TokenSigner::new(&keys)
///     .set_algorithm(AlgorithmId::KS256)
///     .payload(Claims::new().set_issuer("auth.example.com"))
///     .compact()
///     .unwrap();
///
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub struct TokenSigner<'k, K: KeyProvider + ?Sized> {
    key_provider: &'k K,
    header: Claims,
    payload: Claims,
    crypto: Arc<dyn CryptoProvider>,
}

impl<'k, K: KeyProvider + ?Sized> TokenSigner<'k, K> {
    /// Create a signer with an empty header and payload
    pub fn new(key_provider: &'k K) -> Self {
        Self {
            key_provider,
            header: Claims::new(),
            payload: Claims::new(),
            crypto: Arc::new(DefaultCrypto),
        }
    }

    /// Replace the header claims
    pub fn header(mut self, header: Claims) -> Self {
        self.header = header;
        self
    }

    /// Replace the payload claims
    pub fn payload(mut self, payload: Claims) -> Self {
        self.payload = payload;
        self
    }

    /// Write `alg` into the header
    pub fn set_algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.header = self.header.set_algorithm(algorithm);
        self
    }

    /// Use a custom crypto backend
    pub fn with_crypto(mut self, crypto: Arc<dyn CryptoProvider>) -> Self {
        self.crypto = crypto;
        self
    }

    /// Get the header claims
    pub fn header_claims(&self) -> &Claims {
        &self.header
    }

    /// Get the payload claims
    pub fn payload_claims(&self) -> &Claims {
        &self.payload
    }

    /// Encode and sign, producing `header.payload.signature`
    ///
    /// The algorithm comes from the header's `alg`, or from the key provider's
    /// declared algorithm when the header has none. A declared algorithm that
    /// differs from the header's `alg` is an [`Error::AlgorithmMismatch`].
    /// Output the verifier would reject as oversized fails with
    /// [`Error::SigningFailed`].
    pub fn compact(&self) -> Result<String> {
        let declared = self.key_provider.declared_algorithm();
        let algorithm = match (self.header.algorithm(), declared) {
            (Some(alg), declared) => {
                let algorithm = algorithm::resolve(alg)?;
                if let Some(declared) = declared {
                    if declared != algorithm.id() {
                        return Err(Error::AlgorithmMismatch(format!(
                            "key provider declares {declared}, header names {}",
                            algorithm.id()
                        )));
                    }
                }
                algorithm
            }
            (None, Some(declared)) => declared.algorithm(),
            (None, None) => {
                return Err(Error::MissingAlgorithm(
                    "header has no 'alg' claim and the key provider declares none".to_string(),
                ))
            }
        };

        let header = match self.header.algorithm() {
            Some(_) => Cow::Borrowed(&self.header),
            None => Cow::Owned(self.header.clone().set_algorithm(algorithm.id())),
        };

        let header_json = header.to_json().map_err(into_signing_failed)?;
        check_size("header", header_json.len(), MAX_DECODED_HEADER_SIZE)?;
        let payload_json = self.payload.to_json().map_err(into_signing_failed)?;
        check_size("payload", payload_json.len(), MAX_DECODED_PAYLOAD_SIZE)?;

        let mut token = base64url::encode_bytes(&header_json);
        token.push('.');
        token.push_str(&base64url::encode_bytes(&payload_json));
        check_size("token", token.len(), MAX_TOKEN_LENGTH)?;

        let signature = self
            .crypto
            .sign(&algorithm, self.key_provider.sign_key(), token.as_bytes())
            .map_err(into_signing_failed)?;
        check_size("signature", signature.len(), MAX_DECODED_SIGNATURE_SIZE)?;

        token.push('.');
        token.push_str(&base64url::encode_bytes(&signature));
        check_size("token", token.len(), MAX_TOKEN_LENGTH)?;

        trace!(algorithm = %algorithm.id(), "token signed");
        Ok(token)
    }
}

fn check_size(part: &str, size: usize, max: usize) -> Result<()> {
    if size > max {
        return Err(Error::SigningFailed(format!(
            "{part} too large: {size} bytes (maximum: {max} bytes)"
        )));
    }
    Ok(())
}

fn into_signing_failed(error: Error) -> Error {
    match error {
        Error::SigningFailed(_) => error,
        other => Error::SigningFailed(other.reason().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::keys::{Key, KeyPair, SharedSecret};

    #[test]
    fn test_missing_algorithm() {
        let keys = SharedSecret::new(b"secret".to_vec());
        let result = TokenSigner::new(&keys).compact();
        assert!(matches!(result, Err(Error::MissingAlgorithm(_))));
    }

    #[test]
    fn test_unsupported_algorithm() {
        let keys = SharedSecret::new(b"secret".to_vec());
        let header = Claims::new().set_claim("alg", "none").unwrap();
        let result = TokenSigner::new(&keys).header(header).compact();
        assert!(matches!(result, Err(Error::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_wrong_key_kind_fails_signing() {
        let keys = KeyPair::new(vec![1, 2, 3], vec![4, 5, 6]);
        let result = TokenSigner::new(&keys)
            .set_algorithm(AlgorithmId::HS256)
            .compact();
        assert!(matches!(result, Err(Error::SigningFailed(_))));
    }

    #[test]
    fn test_compact_layout() {
        let keys = SharedSecret::new(b"secret".to_vec());
        let signer = TokenSigner::new(&keys)
            .set_algorithm(AlgorithmId::HS512)
            .payload(Claims::new().set_subject("user"));
        let token = signer.compact().unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(
            base64url::decode_string(parts[0], 1024).unwrap(),
            r#"{"alg":"HS512"}"#
        );
        assert_eq!(
            base64url::decode_string(parts[1], 1024).unwrap(),
            r#"{"sub":"user"}"#
        );
        assert_eq!(base64url::decode_bytes(parts[2], 1024).unwrap().len(), 64);
        assert!(!token.contains('='));

        // claims are borrowed, not consumed
        assert_eq!(signer.payload_claims().subject(), Some("user"));
        assert_eq!(signer.compact().unwrap(), token);
    }

    #[test]
    fn test_oversized_output_fails() {
        let keys = SharedSecret::new(b"secret".to_vec());

        // 50,000 bytes of JSON encode to more than MAX_TOKEN_LENGTH
        let payload = Claims::new().set_claim("blob", "x".repeat(50_000)).unwrap();
        let result = TokenSigner::new(&keys)
            .set_algorithm(AlgorithmId::HS256)
            .payload(payload)
            .compact();
        assert!(matches!(result, Err(Error::SigningFailed(_))));

        let payload = Claims::new()
            .set_claim("blob", "x".repeat(MAX_DECODED_PAYLOAD_SIZE))
            .unwrap();
        let result = TokenSigner::new(&keys)
            .set_algorithm(AlgorithmId::HS256)
            .payload(payload)
            .compact();
        assert!(matches!(result, Err(Error::SigningFailed(_))));

        let header = Claims::new()
            .set_claim("kid", "k".repeat(MAX_DECODED_HEADER_SIZE))
            .unwrap();
        let result = TokenSigner::new(&keys)
            .header(header)
            .set_algorithm(AlgorithmId::HS256)
            .compact();
        assert!(matches!(result, Err(Error::SigningFailed(_))));
    }

    #[test]
    fn test_largest_accepted_payload_verifies() {
        use crate::verifier::TokenVerifier;

        let keys = SharedSecret::new(b"secret".to_vec());
        let payload = Claims::new().set_claim("blob", "x".repeat(40_000)).unwrap();
        let token = TokenSigner::new(&keys)
            .set_algorithm(AlgorithmId::HS256)
            .payload(payload)
            .compact()
            .unwrap();
        assert!(token.len() <= MAX_TOKEN_LENGTH);

        let verifier = TokenVerifier::builder(&keys).build().unwrap();
        assert!(verifier.verify_at(&token, 0).is_ok());
    }

    #[test]
    fn test_declared_algorithm_fills_missing_alg() {
        let keys = SharedSecret::new(b"secret".to_vec()).with_algorithm(AlgorithmId::KS256);
        let signer = TokenSigner::new(&keys).header(Claims::new().set_token_type("JWT"));
        let token = signer.compact().unwrap();

        let header = token.split('.').next().unwrap();
        assert_eq!(
            base64url::decode_string(header, 1024).unwrap(),
            r#"{"typ":"JWT","alg":"KS256"}"#
        );
        // the caller's header is left as it was
        assert_eq!(signer.header_claims().algorithm(), None);
    }

    #[test]
    fn test_header_alg_must_match_declared() {
        let keys = SharedSecret::new(b"secret".to_vec()).with_algorithm(AlgorithmId::KS256);

        let result = TokenSigner::new(&keys)
            .set_algorithm(AlgorithmId::HS256)
            .compact();
        assert!(matches!(result, Err(Error::AlgorithmMismatch(_))));

        assert!(TokenSigner::new(&keys)
            .set_algorithm(AlgorithmId::KS256)
            .compact()
            .is_ok());
    }

    struct FailingCrypto;

    impl CryptoProvider for FailingCrypto {
        fn sign(&self, _: &Algorithm, _: &Key, _: &[u8]) -> Result<Vec<u8>> {
            Err(Error::MalformedToken("backend exploded".to_string()))
        }

        fn verify(&self, _: &Algorithm, _: &Key, _: &[u8], _: &[u8]) -> bool {
            false
        }
    }

    #[test]
    fn test_provider_errors_become_signing_failed() {
        let keys = SharedSecret::new(b"secret".to_vec());
        let result = TokenSigner::new(&keys)
            .set_algorithm(AlgorithmId::HS256)
            .with_crypto(Arc::new(FailingCrypto))
            .compact();
        assert_eq!(
            result,
            Err(Error::SigningFailed("backend exploded".to_string()))
        );
    }
}
