//! RSASSA-PKCS1-v1_5 (RS*) and RSASSA-PSS (PS*) via aws-lc-rs
//!
//! Private keys are PKCS#8 DER. Public keys are PKCS#1 `RSAPublicKey` DER, as
//! returned by `RsaKeyPair::public_key()`. Moduli from 2048 to 8192 bits are
//! accepted on verification.

use crate::algorithm::SignatureAlgorithm;
use crate::error::{Error, Result};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, RsaEncoding, RsaKeyPair, UnparsedPublicKey};
use tracing::debug;

fn padding(algorithm: SignatureAlgorithm) -> Option<&'static dyn RsaEncoding> {
    match algorithm {
        SignatureAlgorithm::RsaPkcs1Sha256 => Some(&signature::RSA_PKCS1_SHA256),
        SignatureAlgorithm::RsaPkcs1Sha384 => Some(&signature::RSA_PKCS1_SHA384),
        SignatureAlgorithm::RsaPkcs1Sha512 => Some(&signature::RSA_PKCS1_SHA512),
        SignatureAlgorithm::RsaPssSha256 => Some(&signature::RSA_PSS_SHA256),
        SignatureAlgorithm::RsaPssSha384 => Some(&signature::RSA_PSS_SHA384),
        SignatureAlgorithm::RsaPssSha512 => Some(&signature::RSA_PSS_SHA512),
        SignatureAlgorithm::EcdsaSha256
        | SignatureAlgorithm::EcdsaSha384
        | SignatureAlgorithm::EcdsaSha512
        | SignatureAlgorithm::Ed25519
        | SignatureAlgorithm::Ed448 => None,
    }
}

fn verification_algorithm(
    algorithm: SignatureAlgorithm,
) -> Option<&'static dyn signature::VerificationAlgorithm> {
    match algorithm {
        SignatureAlgorithm::RsaPkcs1Sha256 => Some(&signature::RSA_PKCS1_2048_8192_SHA256),
        SignatureAlgorithm::RsaPkcs1Sha384 => Some(&signature::RSA_PKCS1_2048_8192_SHA384),
        SignatureAlgorithm::RsaPkcs1Sha512 => Some(&signature::RSA_PKCS1_2048_8192_SHA512),
        SignatureAlgorithm::RsaPssSha256 => Some(&signature::RSA_PSS_2048_8192_SHA256),
        SignatureAlgorithm::RsaPssSha384 => Some(&signature::RSA_PSS_2048_8192_SHA384),
        SignatureAlgorithm::RsaPssSha512 => Some(&signature::RSA_PSS_2048_8192_SHA512),
        SignatureAlgorithm::EcdsaSha256
        | SignatureAlgorithm::EcdsaSha384
        | SignatureAlgorithm::EcdsaSha512
        | SignatureAlgorithm::Ed25519
        | SignatureAlgorithm::Ed448 => None,
    }
}

pub(super) fn sign(algorithm: SignatureAlgorithm, pkcs8: &[u8], content: &[u8]) -> Result<Vec<u8>> {
    let padding = padding(algorithm)
        .ok_or_else(|| Error::SigningFailed(format!("{algorithm:?} is not an RSA algorithm")))?;

    let key_pair = RsaKeyPair::from_pkcs8(pkcs8).map_err(|e| {
        debug!(error = %e, "RSA private key rejected");
        Error::SigningFailed(format!("RSA private key rejected: {e}"))
    })?;

    let mut signature = vec![0u8; key_pair.public_modulus_len()];
    key_pair
        .sign(padding, &SystemRandom::new(), content, &mut signature)
        .map_err(|_| Error::SigningFailed("RSA signing operation failed".to_string()))?;

    Ok(signature)
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
