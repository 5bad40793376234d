//! Key material and key providers
//!
//! - [`SymmetricKey`]: raw secret bytes for the HS*/KS* families
//! - [`PrivateKey`]: PKCS#8 DER for RSA, ECDSA and EdDSA signing
//! - [`PublicKey`]: RSA PKCS#1 (or SPKI) DER, an uncompressed EC point, or a
//!   raw Ed25519 key
//!
//! Secret and private bytes are wiped on drop and never printed by `Debug`.

use crate::algorithm::AlgorithmId;
use std::fmt;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key material handed to a [`CryptoProvider`](crate::CryptoProvider)
#[derive(Debug, Clone)]
pub enum Key {
    /// Shared secret for MAC algorithms
    Symmetric(SymmetricKey),

    /// Private key for signature algorithms
    Private(PrivateKey),

    /// Public key for signature algorithms
    Public(PublicKey),
}

impl Key {
    /// Create a symmetric key from bytes
    pub fn symmetric(secret: impl Into<Vec<u8>>) -> Self {
        Key::Symmetric(SymmetricKey::new(secret.into()))
    }

    /// Create a private key from PKCS#8 DER
    pub fn private_pkcs8(der: impl Into<Vec<u8>>) -> Self {
        Key::Private(PrivateKey::from_pkcs8(der.into()))
    }

    /// Create a public key from its encoded bytes
    pub fn public(bytes: impl Into<Vec<u8>>) -> Self {
        Key::Public(PublicKey::new(bytes.into()))
    }

    /// Get key type name for log and error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::Symmetric(_) => "Symmetric",
            Key::Private(_) => "Private",
            Key::Public(_) => "Public",
        }
    }

    pub fn as_symmetric(&self) -> Option<&SymmetricKey> {
        match self {
            Key::Symmetric(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_private(&self) -> Option<&PrivateKey> {
        match self {
            Key::Private(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_public(&self) -> Option<&PublicKey> {
        match self {
            Key::Public(key) => Some(key),
            _ => None,
        }
    }
}

impl From<SymmetricKey> for Key {
    fn from(key: SymmetricKey) -> Self {
        Key::Symmetric(key)
    }
}

impl From<PrivateKey> for Key {
    fn from(key: PrivateKey) -> Self {
        Key::Private(key)
    }
}

impl From<PublicKey> for Key {
    fn from(key: PublicKey) -> Self {
        Key::Public(key)
    }
}

/// Symmetric key for MAC algorithms
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Create a new symmetric key
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for SymmetricKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SymmetricKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// Private key (PKCS#8 DER)
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    der: Vec<u8>,
}

impl PrivateKey {
    /// Wrap PKCS#8 DER bytes
    ///
    /// The encoding is checked lazily by the crypto backend on first use.
    pub fn from_pkcs8(der: Vec<u8>) -> Self {
        Self { der }
    }

    /// Get the DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("len", &self.der.len())
            .finish_non_exhaustive()
    }
}

/// Public key bytes in the encoding the algorithm family expects
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Source of signing and verification keys
///
/// Keys are borrowed for the duration of one sign or verify call.
pub trait KeyProvider: Send + Sync {
    /// Key used by [`TokenSigner`](crate::TokenSigner)
    fn sign_key(&self) -> &Key;

    /// Key used by [`TokenVerifier`](crate::TokenVerifier)
    fn verify_key(&self) -> &Key;

    /// Algorithm the keys are meant for
    ///
    /// A verifier without an explicit expected algorithm pins tokens to this
    /// one.
    fn declared_algorithm(&self) -> Option<AlgorithmId> {
        None
    }
}

impl<T: KeyProvider + ?Sized> KeyProvider for &T {
    fn sign_key(&self) -> &Key {
        (**self).sign_key()
    }

    fn verify_key(&self) -> &Key {
        (**self).verify_key()
    }

    fn declared_algorithm(&self) -> Option<AlgorithmId> {
        (**self).declared_algorithm()
    }
}

impl<T: KeyProvider + ?Sized> KeyProvider for Arc<T> {
    fn sign_key(&self) -> &Key {
        (**self).sign_key()
    }

    fn verify_key(&self) -> &Key {
        (**self).verify_key()
    }

    fn declared_algorithm(&self) -> Option<AlgorithmId> {
        (**self).declared_algorithm()
    }
}

/// Shared secret for the HS*/KS* families; one key signs and verifies
#[derive(Debug, Clone)]
pub struct SharedSecret {
    key: Key,
    algorithm: Option<AlgorithmId>,
}

impl SharedSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            key: Key::symmetric(secret),
            algorithm: None,
        }
    }

    /// Declare the algorithm this secret is meant for
    pub fn with_algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
}

impl KeyProvider for SharedSecret {
    fn sign_key(&self) -> &Key {
        &self.key
    }

    fn verify_key(&self) -> &Key {
        &self.key
    }

    fn declared_algorithm(&self) -> Option<AlgorithmId> {
        self.algorithm
    }
}

/// Private/public key pair for the signature families
#[derive(Debug, Clone)]
pub struct KeyPair {
    private: Key,
    public: Key,
    algorithm: Option<AlgorithmId>,
}

impl KeyPair {
    /// Build from PKCS#8 private key DER and the matching public key bytes
    pub fn new(private_pkcs8: impl Into<Vec<u8>>, public: impl Into<Vec<u8>>) -> Self {
        Self::from_parts(
            PrivateKey::from_pkcs8(private_pkcs8.into()),
            PublicKey::new(public.into()),
        )
    }

    pub fn from_parts(private: PrivateKey, public: PublicKey) -> Self {
        Self {
            private: Key::Private(private),
            public: Key::Public(public),
            algorithm: None,
        }
    }

    /// Declare the algorithm this pair is meant for
    pub fn with_algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
}

impl KeyProvider for KeyPair {
    fn sign_key(&self) -> &Key {
        &self.private
    }

    fn verify_key(&self) -> &Key {
        &self.public
    }

    fn declared_algorithm(&self) -> Option<AlgorithmId> {
        self.algorithm
    }
}
