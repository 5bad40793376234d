//! Cryptographic primitives behind token signing and verification
//!
//! [`CryptoProvider`] is the seam between the token pipeline and the
//! primitives. [`DefaultCrypto`] backs it with `hmac`/`sha2`/`sha3` for the
//! MAC families and aws-lc-rs for RSA, ECDSA and Ed25519.

mod ecdsa;
mod eddsa;
mod hmac;
mod rsa;

use crate::algorithm::{Algorithm, SignatureAlgorithm};
use crate::error::{Error, Result};
use crate::keys::Key;
use tracing::debug;

/// Signs and verifies raw bytes for a resolved [`Algorithm`]
///
/// Implementations must not log key material.
pub trait CryptoProvider: Send + Sync {
    /// Sign `content`, failing with [`Error::SigningFailed`]
    fn sign(&self, algorithm: &Algorithm, key: &Key, content: &[u8]) -> Result<Vec<u8>>;

    /// Check `signature` over `content`
    ///
    /// Returns `false` for a bad signature, a key of the wrong kind, or a
    /// primitive the provider does not implement. Never panics.
    fn verify(&self, algorithm: &Algorithm, key: &Key, content: &[u8], signature: &[u8]) -> bool;
}

/// Built-in crypto backend
///
/// Covers every catalog algorithm except Ed448.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCrypto;

impl CryptoProvider for DefaultCrypto {
    fn sign(&self, algorithm: &Algorithm, key: &Key, content: &[u8]) -> Result<Vec<u8>> {
        match (algorithm, key) {
            (Algorithm::Mac(mac), Key::Symmetric(secret)) => {
                hmac::sign(*mac, secret.as_bytes(), content)
            }
            (Algorithm::Signature(sig), Key::Private(private)) => {
                let der = private.as_der();
                match sig {
                    SignatureAlgorithm::RsaPkcs1Sha256
                    | SignatureAlgorithm::RsaPkcs1Sha384
                    | SignatureAlgorithm::RsaPkcs1Sha512
                    | SignatureAlgorithm::RsaPssSha256
                    | SignatureAlgorithm::RsaPssSha384
                    | SignatureAlgorithm::RsaPssSha512 => rsa::sign(*sig, der, content),
                    SignatureAlgorithm::EcdsaSha256
                    | SignatureAlgorithm::EcdsaSha384
                    | SignatureAlgorithm::EcdsaSha512 => ecdsa::sign(*sig, der, content),
                    SignatureAlgorithm::Ed25519 | SignatureAlgorithm::Ed448 => {
                        eddsa::sign(*sig, der, content)
                    }
                }
            }
            (_, key) => {
                debug!(
                    algorithm = %algorithm.id(),
                    key_type = key.key_type(),
                    "key kind cannot sign with algorithm"
                );
                Err(Error::SigningFailed(format!(
                    "{} key cannot sign with {}",
                    key.key_type(),
                    algorithm.id()
                )))
            }
        }
    }

    fn verify(&self, algorithm: &Algorithm, key: &Key, content: &[u8], signature: &[u8]) -> bool {
        let valid = match (algorithm, key) {
            (Algorithm::Mac(mac), Key::Symmetric(secret)) => {
                hmac::verify(*mac, secret.as_bytes(), content, signature)
            }
            (Algorithm::Signature(sig), Key::Public(public)) => {
                let bytes = public.as_bytes();
                match sig {
                    SignatureAlgorithm::RsaPkcs1Sha256
                    | SignatureAlgorithm::RsaPkcs1Sha384
                    | SignatureAlgorithm::RsaPkcs1Sha512
                    | SignatureAlgorithm::RsaPssSha256
                    | SignatureAlgorithm::RsaPssSha384
                    | SignatureAlgorithm::RsaPssSha512 => {
                        rsa::verify(*sig, bytes, content, signature)
                    }
                    SignatureAlgorithm::EcdsaSha256
                    | SignatureAlgorithm::EcdsaSha384
                    | SignatureAlgorithm::EcdsaSha512 => {
                        ecdsa::verify(*sig, bytes, content, signature)
                    }
                    SignatureAlgorithm::Ed25519 | SignatureAlgorithm::Ed448 => {
                        eddsa::verify(*sig, bytes, content, signature)
                    }
                }
            }
            (_, key) => {
                debug!(
                    algorithm = %algorithm.id(),
                    key_type = key.key_type(),
                    "key kind cannot verify algorithm"
                );
                return false;
            }
        };

        if !valid {
            debug!(algorithm = %algorithm.id(), "signature rejected by crypto backend");
        }
        valid
    }
}
