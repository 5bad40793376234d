//! Algorithm catalog
//!
//! Maps the closed set of `alg` header identifiers onto the primitive each one
//! names. Resolution is pure and stateless.
//!
//! | id | primitive | symmetric |
//! |---|---|---|
//! | `HS256` `HS384` `HS512` | HMAC-SHA2 | yes |
//! | `KS256` `KS384` `KS512` | HMAC-SHA3 | yes |
//! | `RS256` `RS384` `RS512` | RSASSA-PKCS1-v1_5 | no |
//! | `PS256` `PS384` `PS512` | RSASSA-PSS | no |
//! | `EC256` `EC384` `EC512` | ECDSA | no |
//! | `Ed25519` `Ed448` | EdDSA | no |

use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Algorithm identifier as it appears in the `alg` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    HS256,
    HS384,
    HS512,
    KS256,
    KS384,
    KS512,
    RS256,
    RS384,
    RS512,
    PS256,
    PS384,
    PS512,
    EC256,
    EC384,
    EC512,
    Ed25519,
    Ed448,
}

impl AlgorithmId {
    /// Every identifier in the catalog
    pub const ALL: [AlgorithmId; 17] = [
        AlgorithmId::HS256,
        AlgorithmId::HS384,
        AlgorithmId::HS512,
        AlgorithmId::KS256,
        AlgorithmId::KS384,
        AlgorithmId::KS512,
        AlgorithmId::RS256,
        AlgorithmId::RS384,
        AlgorithmId::RS512,
        AlgorithmId::PS256,
        AlgorithmId::PS384,
        AlgorithmId::PS512,
        AlgorithmId::EC256,
        AlgorithmId::EC384,
        AlgorithmId::EC512,
        AlgorithmId::Ed25519,
        AlgorithmId::Ed448,
    ];

    /// Parse algorithm string from a token header
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::UnsupportedAlgorithm(format!(
                "algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        if s.eq_ignore_ascii_case("none") {
            return Err(Error::UnsupportedAlgorithm(
                "'none' algorithm is rejected".to_string(),
            ));
        }

        match s {
            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),
            "KS256" => Ok(AlgorithmId::KS256),
            "KS384" => Ok(AlgorithmId::KS384),
            "KS512" => Ok(AlgorithmId::KS512),
            "RS256" => Ok(AlgorithmId::RS256),
            "RS384" => Ok(AlgorithmId::RS384),
            "RS512" => Ok(AlgorithmId::RS512),
            "PS256" => Ok(AlgorithmId::PS256),
            "PS384" => Ok(AlgorithmId::PS384),
            "PS512" => Ok(AlgorithmId::PS512),
            "EC256" => Ok(AlgorithmId::EC256),
            "EC384" => Ok(AlgorithmId::EC384),
            "EC512" => Ok(AlgorithmId::EC512),
            "Ed25519" => Ok(AlgorithmId::Ed25519),
            "Ed448" => Ok(AlgorithmId::Ed448),
            _ => Err(Error::UnsupportedAlgorithm(
                "algorithm is not in the catalog".to_string(),
            )),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
            AlgorithmId::KS256 => "KS256",
            AlgorithmId::KS384 => "KS384",
            AlgorithmId::KS512 => "KS512",
            AlgorithmId::RS256 => "RS256",
            AlgorithmId::RS384 => "RS384",
            AlgorithmId::RS512 => "RS512",
            AlgorithmId::PS256 => "PS256",
            AlgorithmId::PS384 => "PS384",
            AlgorithmId::PS512 => "PS512",
            AlgorithmId::EC256 => "EC256",
            AlgorithmId::EC384 => "EC384",
            AlgorithmId::EC512 => "EC512",
            AlgorithmId::Ed25519 => "Ed25519",
            AlgorithmId::Ed448 => "Ed448",
        }
    }

    /// The primitive this identifier names
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            AlgorithmId::HS256 => Algorithm::Mac(MacAlgorithm::HmacSha256),
            AlgorithmId::HS384 => Algorithm::Mac(MacAlgorithm::HmacSha384),
            AlgorithmId::HS512 => Algorithm::Mac(MacAlgorithm::HmacSha512),
            AlgorithmId::KS256 => Algorithm::Mac(MacAlgorithm::HmacSha3_256),
            AlgorithmId::KS384 => Algorithm::Mac(MacAlgorithm::HmacSha3_384),
            AlgorithmId::KS512 => Algorithm::Mac(MacAlgorithm::HmacSha3_512),
            AlgorithmId::RS256 => Algorithm::Signature(SignatureAlgorithm::RsaPkcs1Sha256),
            AlgorithmId::RS384 => Algorithm::Signature(SignatureAlgorithm::RsaPkcs1Sha384),
            AlgorithmId::RS512 => Algorithm::Signature(SignatureAlgorithm::RsaPkcs1Sha512),
            AlgorithmId::PS256 => Algorithm::Signature(SignatureAlgorithm::RsaPssSha256),
            AlgorithmId::PS384 => Algorithm::Signature(SignatureAlgorithm::RsaPssSha384),
            AlgorithmId::PS512 => Algorithm::Signature(SignatureAlgorithm::RsaPssSha512),
            AlgorithmId::EC256 => Algorithm::Signature(SignatureAlgorithm::EcdsaSha256),
            AlgorithmId::EC384 => Algorithm::Signature(SignatureAlgorithm::EcdsaSha384),
            AlgorithmId::EC512 => Algorithm::Signature(SignatureAlgorithm::EcdsaSha512),
            AlgorithmId::Ed25519 => Algorithm::Signature(SignatureAlgorithm::Ed25519),
            AlgorithmId::Ed448 => Algorithm::Signature(SignatureAlgorithm::Ed448),
        }
    }

    /// Check if algorithm is MAC-based (symmetric)
    pub const fn is_symmetric(&self) -> bool {
        self.algorithm().is_symmetric()
    }
}

impl std::str::FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmId::from_str(s)
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for AlgorithmId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AlgorithmId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AlgorithmId::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Message authentication primitives (same key signs and verifies)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacAlgorithm {
    HmacSha256,
    HmacSha384,
    HmacSha512,
    HmacSha3_256,
    HmacSha3_384,
    HmacSha3_512,
}

/// Public-key signature primitives (private key signs, public key verifies)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    RsaPkcs1Sha256,
    RsaPkcs1Sha384,
    RsaPkcs1Sha512,
    RsaPssSha256,
    RsaPssSha384,
    RsaPssSha512,
    EcdsaSha256,
    EcdsaSha384,
    EcdsaSha512,
    Ed25519,
    Ed448,
}

/// A resolved signing algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Mac(MacAlgorithm),
    Signature(SignatureAlgorithm),
}

impl Algorithm {
    /// The wire identifier of this algorithm
    pub const fn id(&self) -> AlgorithmId {
        match self {
            Algorithm::Mac(mac) => match mac {
                MacAlgorithm::HmacSha256 => AlgorithmId::HS256,
                MacAlgorithm::HmacSha384 => AlgorithmId::HS384,
                MacAlgorithm::HmacSha512 => AlgorithmId::HS512,
                MacAlgorithm::HmacSha3_256 => AlgorithmId::KS256,
                MacAlgorithm::HmacSha3_384 => AlgorithmId::KS384,
                MacAlgorithm::HmacSha3_512 => AlgorithmId::KS512,
            },
            Algorithm::Signature(sig) => match sig {
                SignatureAlgorithm::RsaPkcs1Sha256 => AlgorithmId::RS256,
                SignatureAlgorithm::RsaPkcs1Sha384 => AlgorithmId::RS384,
                SignatureAlgorithm::RsaPkcs1Sha512 => AlgorithmId::RS512,
                SignatureAlgorithm::RsaPssSha256 => AlgorithmId::PS256,
                SignatureAlgorithm::RsaPssSha384 => AlgorithmId::PS384,
                SignatureAlgorithm::RsaPssSha512 => AlgorithmId::PS512,
                SignatureAlgorithm::EcdsaSha256 => AlgorithmId::EC256,
                SignatureAlgorithm::EcdsaSha384 => AlgorithmId::EC384,
                SignatureAlgorithm::EcdsaSha512 => AlgorithmId::EC512,
                SignatureAlgorithm::Ed25519 => AlgorithmId::Ed25519,
                SignatureAlgorithm::Ed448 => AlgorithmId::Ed448,
            },
        }
    }

    /// Name of the underlying primitive
    pub const fn native_name(&self) -> &'static str {
        match self {
            Algorithm::Mac(mac) => match mac {
                MacAlgorithm::HmacSha256 => "HMAC-SHA256",
                MacAlgorithm::HmacSha384 => "HMAC-SHA384",
                MacAlgorithm::HmacSha512 => "HMAC-SHA512",
                MacAlgorithm::HmacSha3_256 => "HMAC-SHA3-256",
                MacAlgorithm::HmacSha3_384 => "HMAC-SHA3-384",
                MacAlgorithm::HmacSha3_512 => "HMAC-SHA3-512",
            },
            Algorithm::Signature(sig) => match sig {
                SignatureAlgorithm::RsaPkcs1Sha256 => "RSA-PKCS1-SHA256",
                SignatureAlgorithm::RsaPkcs1Sha384 => "RSA-PKCS1-SHA384",
                SignatureAlgorithm::RsaPkcs1Sha512 => "RSA-PKCS1-SHA512",
                SignatureAlgorithm::RsaPssSha256 => "RSA-PSS-SHA256",
                SignatureAlgorithm::RsaPssSha384 => "RSA-PSS-SHA384",
                SignatureAlgorithm::RsaPssSha512 => "RSA-PSS-SHA512",
                SignatureAlgorithm::EcdsaSha256 => "ECDSA-SHA256",
                SignatureAlgorithm::EcdsaSha384 => "ECDSA-SHA384",
                SignatureAlgorithm::EcdsaSha512 => "ECDSA-SHA512",
                SignatureAlgorithm::Ed25519 => "EdDSA-Ed25519",
                SignatureAlgorithm::Ed448 => "EdDSA-Ed448",
            },
        }
    }

    /// Whether signing and verification use the same key material
    pub const fn is_symmetric(&self) -> bool {
        matches!(self, Algorithm::Mac(_))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id(), self.native_name())
    }
}

/// Resolve an `alg` header value to its algorithm
pub fn resolve(id: &str) -> Result<Algorithm> {
    AlgorithmId::from_str(id).map(|id| id.algorithm())
}
