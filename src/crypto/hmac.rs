//! HMAC over the SHA-2 (HS*) and SHA-3 (KS*) families

use crate::algorithm::MacAlgorithm;
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use sha3::{Sha3_256, Sha3_384, Sha3_512};

/// Compute the MAC of `content` under `secret`
pub(super) fn sign(algorithm: MacAlgorithm, secret: &[u8], content: &[u8]) -> Result<Vec<u8>> {
    match algorithm {
        MacAlgorithm::HmacSha256 => compute::<Hmac<Sha256>>(secret, content),
        MacAlgorithm::HmacSha384 => compute::<Hmac<Sha384>>(secret, content),
        MacAlgorithm::HmacSha512 => compute::<Hmac<Sha512>>(secret, content),
        MacAlgorithm::HmacSha3_256 => compute::<Hmac<Sha3_256>>(secret, content),
        MacAlgorithm::HmacSha3_384 => compute::<Hmac<Sha3_384>>(secret, content),
        MacAlgorithm::HmacSha3_512 => compute::<Hmac<Sha3_512>>(secret, content),
    }
}

/// Recompute the MAC and compare in constant time
pub(super) fn verify(
    algorithm: MacAlgorithm,
    secret: &[u8],
    content: &[u8],
    signature: &[u8],
) -> bool {
    match sign(algorithm, secret, content) {
        Ok(expected) => expected.len() == signature.len() && constant_time_eq(&expected, signature),
        Err(_) => false,
    }
}

fn compute<M: Mac + KeyInit>(secret: &[u8], content: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| Error::SigningFailed("invalid HMAC key length".to_string()))?;
    mac.update(content);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    // RFC 4231 test case 2
    #[test]
    fn test_hmac_sha256_known_answer() {
        let mac = sign(
            MacAlgorithm::HmacSha256,
            b"Jefe",
            b"what do ya want for nothing?",
        )
        .unwrap();
        assert_eq!(
            hex(&mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_output_lengths() {
        let cases = [
            (MacAlgorithm::HmacSha256, 32),
            (MacAlgorithm::HmacSha384, 48),
            (MacAlgorithm::HmacSha512, 64),
            (MacAlgorithm::HmacSha3_256, 32),
            (MacAlgorithm::HmacSha3_384, 48),
            (MacAlgorithm::HmacSha3_512, 64),
        ];
        for (algorithm, len) in cases {
            assert_eq!(sign(algorithm, b"secret", b"input").unwrap().len(), len);
        }
    }

    #[test]
    fn test_sha2_and_sha3_differ() {
        let sha2 = sign(MacAlgorithm::HmacSha256, b"secret", b"input").unwrap();
        let sha3 = sign(MacAlgorithm::HmacSha3_256, b"secret", b"input").unwrap();
        assert_ne!(sha2, sha3);
    }

    #[test]
    fn test_verify() {
        let mac = sign(MacAlgorithm::HmacSha3_512, b"secret", b"input").unwrap();
        assert!(verify(MacAlgorithm::HmacSha3_512, b"secret", b"input", &mac));
        assert!(!verify(MacAlgorithm::HmacSha3_512, b"other", b"input", &mac));
        assert!(!verify(MacAlgorithm::HmacSha3_512, b"secret", b"inpuT", &mac));
        assert!(!verify(MacAlgorithm::HmacSha3_512, b"secret", b"input", &mac[..32]));
        assert!(!verify(MacAlgorithm::HmacSha3_512, b"secret", b"input", &[]));
    }
}
