//! EdDSA (Ed25519) via aws-lc-rs
//!
//! Public keys are the raw 32-byte encoding. Ed448 is not offered by
//! aws-lc-rs, so it is reported as unavailable here and left to custom
//! [`CryptoProvider`](super::CryptoProvider) implementations.

use crate::algorithm::SignatureAlgorithm;
use crate::error::{Error, Result};

use aws_lc_rs::signature::{ED25519, Ed25519KeyPair, UnparsedPublicKey};
use tracing::debug;

pub(super) fn sign(algorithm: SignatureAlgorithm, pkcs8: &[u8], content: &[u8]) -> Result<Vec<u8>> {
    match algorithm {
        SignatureAlgorithm::Ed25519 => {
            let key_pair = Ed25519KeyPair::from_pkcs8(pkcs8).map_err(|e| {
                debug!(error = %e, "Ed25519 private key rejected");
                Error::SigningFailed(format!("Ed25519 private key rejected: {e}"))
            })?;
            Ok(key_pair.sign(content).as_ref().to_vec())
        }
        SignatureAlgorithm::Ed448 => {
            debug!("Ed448 requested from the default crypto backend");
            Err(Error::SigningFailed(
                "Ed448 is not available in the default crypto backend".to_string(),
            ))
        }
        SignatureAlgorithm::RsaPkcs1Sha256
        | SignatureAlgorithm::RsaPkcs1Sha384
        | SignatureAlgorithm::RsaPkcs1Sha512
        | SignatureAlgorithm::RsaPssSha256
        | SignatureAlgorithm::RsaPssSha384
        | SignatureAlgorithm::RsaPssSha512
        | SignatureAlgorithm::EcdsaSha256
        | SignatureAlgorithm::EcdsaSha384
        | SignatureAlgorithm::EcdsaSha512 => Err(Error::SigningFailed(format!(
            "{algorithm:?} is not an EdDSA algorithm"
        ))),
    }
}

pub(super) fn verify(
    algorithm: SignatureAlgorithm,
    public_key: &[u8],
    content: &[u8],
    signature: &[u8],
) -> bool {
    match algorithm {
        SignatureAlgorithm::Ed25519 => UnparsedPublicKey::new(&ED25519, public_key)
            .verify(content, signature)
            .is_ok(),
        SignatureAlgorithm::Ed448 => false,
        SignatureAlgorithm::RsaPkcs1Sha256
        | SignatureAlgorithm::RsaPkcs1Sha384
        | SignatureAlgorithm::RsaPkcs1Sha512
        | SignatureAlgorithm::RsaPssSha256
        | SignatureAlgorithm::RsaPssSha384
        | SignatureAlgorithm::RsaPssSha512
        | SignatureAlgorithm::EcdsaSha256
        | SignatureAlgorithm::EcdsaSha384
        | SignatureAlgorithm::EcdsaSha512 => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lc_rs::rand::SystemRandom;
    use aws_lc_rs::signature::KeyPair;

    #[test]
    fn test_ed25519_sign_and_verify() {
        let pkcs8 = Ed25519KeyPair::generate_pkcs8(&SystemRandom::new()).unwrap();
        let public = Ed25519KeyPair::from_pkcs8(pkcs8.as_ref())
            .unwrap()
            .public_key()
            .as_ref()
            .to_vec();

        let sig = sign(SignatureAlgorithm::Ed25519, pkcs8.as_ref(), b"payload").unwrap();
        assert_eq!(sig.len(), 64);
        assert!(verify(SignatureAlgorithm::Ed25519, &public, b"payload", &sig));
        assert!(!verify(SignatureAlgorithm::Ed25519, &public, b"payloae", &sig));
    }

    #[test]
    fn test_ed448_unavailable() {
        assert!(matches!(
            sign(SignatureAlgorithm::Ed448, b"", b"payload"),
            Err(Error::SigningFailed(_))
        ));
        assert!(!verify(SignatureAlgorithm::Ed448, &[0; 57], b"payload", &[0; 114]));
    }
}
