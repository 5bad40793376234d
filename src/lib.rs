//! # jwtkit - Compact Token Signing and Verification
//!
//! > Sign and verify compact, JWT-style tokens with a strict, ordered validation pipeline.
//!
//! **jwtkit** issues and validates self-contained authorization tokens in the compact
//! `header.payload.signature` format, each segment base64url-encoded without padding. Tokens
//! are signed with a MAC (shared secret) or a digital signature (key pair) and carry a small
//! set of reserved claims plus any number of extension claims.
//!
//! ## Overview
//!
//! Verification is the dangerous half of any token library. Common pitfalls include accepting
//! the `none` algorithm, algorithm confusion (checking a token against an algorithm the
//! attacker chose), acting on payload claims before the signature is checked, and timing
//! leaks in MAC comparison.
//!
//! **jwtkit** runs a fixed pipeline and stops at the first failure: parse, resolve the
//! algorithm, verify the signature, pin the algorithm, and only then decode and check the
//! payload claims. Each failure maps to exactly one [`ErrorKind`]. The verifier is configured
//! once through a builder and is immutable afterwards, so a single instance can be shared by
//! any number of threads.
//!
//! ## Quick Start
//!
//! ```
//! use jwtkit::{AlgorithmId, Claims, SharedSecret, TokenSigner, TokenVerifier};
//! use std::time::Duration;
//!
//! let keys = SharedSecret::new(b"a-long-random-secret".to_vec())
//!     .with_algorithm(AlgorithmId::KS256);
//!
//! let token = TokenSigner::new(&keys)
//!     .set_algorithm(AlgorithmId::KS256)
//!     .payload(
//!         Claims::new()
//!             .set_issuer("auth.example.com")
//!             .set_subject("user-42")
//!             .set_expiration(Duration::from_secs(3600))
//!             .set_issued_now(),
//!     )
//!     .compact()?;
//!
//! let verifier = TokenVerifier::builder(&keys)
//!     .expect_issuer("auth.example.com")
//!     .require_timestamp_claim(true)
//!     .build()?;
//!
//! let verified = verifier.verify(&token)?;
//! assert_eq!(verified.payload().subject(), Some("user-42"));
//! # Ok::<(), jwtkit::Error>(())
//! ```
//!
//! ## Validation Flow
//!
//! ```text
//! token string
//!     │ length check, split into 3 segments         → MalformedToken
//!     │ decode header                               → MalformedToken
//!     │ read `alg`                                  → MissingAlgorithm
//!     │ resolve `alg` in the catalog                → UnsupportedAlgorithm
//!     │ decode signature                            → MalformedToken
//!     │ verify signature over `header.payload`      → SignatureInvalid
//!     │ compare with expected / declared algorithm  → AlgorithmMismatch
//!     │ decode payload                              → MalformedToken
//!     │ exp, nbf (with clock skew)                  → TokenExpired / TokenNotYetValid
//!     │ iss, aud, sub                               → IssuerMismatch / AudienceMismatch / SubjectMismatch
//!     │ iat, jti presence                           → MissingTimestampClaim / MissingIdClaim
//!     ▼
//! VerifiedToken { header, payload }
//! ```
//!
//! ## Algorithm Support
//!
//! - **HMAC-SHA2**: HS256, HS384, HS512
//! - **HMAC-SHA3**: KS256, KS384, KS512
//! - **RSASSA-PKCS1-v1_5**: RS256, RS384, RS512
//! - **RSASSA-PSS**: PS256, PS384, PS512
//! - **ECDSA**: EC256 (P-256), EC384 (P-384), EC512 (P-521)
//! - **EdDSA**: Ed25519, Ed448
//!
//! The built-in [`DefaultCrypto`] backend covers all of these except Ed448, which can be
//! supplied through a custom [`CryptoProvider`].
//!
//! ## Keys
//!
//! ```ignore
//! // Shared secret (HS*, KS*)
//! SharedSecret::new(secret_bytes).with_algorithm(AlgorithmId::HS256)
//!
//! // Key pair (RS*, PS*, EC*, Ed25519): PKCS#8 private key and its public key
//! KeyPair::new(pkcs8_der, public_key_bytes).with_algorithm(AlgorithmId::PS512)
//! ```
//!
//! A declared algorithm is used for signing when the header names none, and pins verification
//! to that algorithm. [`VerifierBuilder::expect_algorithm`] must agree with it.
//!
//! ## Logging
//!
//! Diagnostics are emitted through [`tracing`]: the verifier logs each rejection at `debug`
//! with the failing step and [`ErrorKind`], the signer logs at `trace`. Claim values and key
//! bytes are never logged. Installing a subscriber is up to the application.

pub mod algorithm;
pub mod claims;
pub mod crypto;
pub mod error;
pub mod keys;
mod limits;
pub mod token;
pub mod utils;
mod verifier;

pub use algorithm::{resolve, Algorithm, AlgorithmId, MacAlgorithm, SignatureAlgorithm};
pub use claims::Claims;
pub use crypto::{CryptoProvider, DefaultCrypto};
pub use error::{Error, ErrorKind, Result};
pub use keys::{Key, KeyPair, KeyProvider, PrivateKey, PublicKey, SharedSecret, SymmetricKey};
pub use token::{TokenSigner, VerifiedToken};
pub use verifier::{TokenVerifier, VerifierBuilder, VerifierConfig};
