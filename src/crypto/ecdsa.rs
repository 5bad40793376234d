//! ECDSA over P-256, P-384 and P-521 (EC*) via aws-lc-rs
//!
//! Signatures use the fixed-length `r || s` encoding. Public keys are
//! uncompressed SEC1 points.

use crate::algorithm::SignatureAlgorithm;
use crate::error::{Error, Result};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, EcdsaKeyPair, EcdsaSigningAlgorithm, UnparsedPublicKey};
use tracing::debug;

fn signing_algorithm(algorithm: SignatureAlgorithm) -> Option<&'static EcdsaSigningAlgorithm> {
    match algorithm {
        SignatureAlgorithm::EcdsaSha256 => Some(&signature::ECDSA_P256_SHA256_FIXED_SIGNING),
        SignatureAlgorithm::EcdsaSha384 => Some(&signature::ECDSA_P384_SHA384_FIXED_SIGNING),
        SignatureAlgorithm::EcdsaSha512 => Some(&signature::ECDSA_P521_SHA512_FIXED_SIGNING),
        SignatureAlgorithm::RsaPkcs1Sha256
        | SignatureAlgorithm::RsaPkcs1Sha384
        | SignatureAlgorithm::RsaPkcs1Sha512
        | SignatureAlgorithm::RsaPssSha256
        | SignatureAlgorithm::RsaPssSha384
        | SignatureAlgorithm::RsaPssSha512
        | SignatureAlgorithm::Ed25519
        | SignatureAlgorithm::Ed448 => None,
    }
}

fn verification_algorithm(
    algorithm: SignatureAlgorithm,
) -> Option<&'static dyn signature::VerificationAlgorithm> {
    match algorithm {
        SignatureAlgorithm::EcdsaSha256 => Some(&signature::ECDSA_P256_SHA256_FIXED),
        SignatureAlgorithm::EcdsaSha384 => Some(&signature::ECDSA_P384_SHA384_FIXED),
        SignatureAlgorithm::EcdsaSha512 => Some(&signature::ECDSA_P521_SHA512_FIXED),
        SignatureAlgorithm::RsaPkcs1Sha256
        | SignatureAlgorithm::RsaPkcs1Sha384
        | SignatureAlgorithm::RsaPkcs1Sha512
        | SignatureAlgorithm::RsaPssSha256
        | SignatureAlgorithm::RsaPssSha384
        | SignatureAlgorithm::RsaPssSha512
        | SignatureAlgorithm::Ed25519
        | SignatureAlgorithm::Ed448 => None,
    }
}

pub(super) fn sign(algorithm: SignatureAlgorithm, pkcs8: &[u8], content: &[u8]) -> Result<Vec<u8>> {
    let signing = signing_algorithm(algorithm)
        .ok_or_else(|| Error::SigningFailed(format!("{algorithm:?} is not an ECDSA algorithm")))?;

    let key_pair = EcdsaKeyPair::from_pkcs8(signing, pkcs8).map_err(|e| {
        debug!(error = %e, "ECDSA private key rejected");
        Error::SigningFailed(format!("ECDSA private key rejected: {e}"))
    })?;

    key_pair
        .sign(&SystemRandom::new(), content)
        .map(|sig| sig.as_ref().to_vec())
        .map_err(|_| Error::SigningFailed("ECDSA signing operation failed".to_string()))
}

pub(super) fn verify(
    algorithm: SignatureAlgorithm,
    public_key: &[u8],
    content: &[u8],
    signature: &[u8],
) -> bool {
    let Some(verification) = verification_algorithm(algorithm) else {
        return false;
    };
    UnparsedPublicKey::new(verification, public_key)
        .verify(content, signature)
        .is_ok()
}
