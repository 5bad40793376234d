//! Shared key fixtures for integration tests
#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED_SIGNING,
    ECDSA_P521_SHA512_FIXED_SIGNING, EcdsaKeyPair, Ed25519KeyPair, KeyPair as _, RsaKeyPair,
};
use hmac::{Hmac, Mac};
use jwtkit::{AlgorithmId, KeyPair, SharedSecret};
use rsa::{RsaPrivateKey, pkcs8::EncodePrivateKey};
use sha2::Sha256;
use std::sync::OnceLock;

pub const SECRET: &[u8] = b"integration-test-secret-of-reasonable-length";

pub fn shared_secret() -> SharedSecret {
    SharedSecret::new(SECRET.to_vec())
}

/// One 2048-bit RSA key per test binary; generation is slow in debug builds
pub fn rsa_keys() -> KeyPair {
    static PKCS8: OnceLock<Vec<u8>> = OnceLock::new();
    let pkcs8 = PKCS8.get_or_init(|| {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate key");
        private_key
            .to_pkcs8_der()
            .expect("failed to serialize to PKCS#8")
            .as_bytes()
            .to_vec()
    });
    let public = RsaKeyPair::from_pkcs8(pkcs8)
        .expect("aws-lc-rs rejected RSA key")
        .public_key()
        .as_ref()
        .to_vec();
    KeyPair::new(pkcs8.clone(), public)
}

pub fn ecdsa_keys(algorithm: AlgorithmId) -> KeyPair {
    let signing = match algorithm {
        AlgorithmId::EC256 => &ECDSA_P256_SHA256_FIXED_SIGNING,
        AlgorithmId::EC384 => &ECDSA_P384_SHA384_FIXED_SIGNING,
        AlgorithmId::EC512 => &ECDSA_P521_SHA512_FIXED_SIGNING,
        other => panic!("{other} is not an ECDSA algorithm"),
    };
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(signing, &SystemRandom::new()).unwrap();
    let public = EcdsaKeyPair::from_pkcs8(signing, pkcs8.as_ref())
        .unwrap()
        .public_key()
        .as_ref()
        .to_vec();
    KeyPair::new(pkcs8.as_ref().to_vec(), public)
}

pub fn ed25519_keys() -> KeyPair {
    let pkcs8 = Ed25519KeyPair::generate_pkcs8(&SystemRandom::new()).unwrap();
    let public = Ed25519KeyPair::from_pkcs8(pkcs8.as_ref())
        .unwrap()
        .public_key()
        .as_ref()
        .to_vec();
    KeyPair::new(pkcs8.as_ref().to_vec(), public)
}

/// Key pair suited to any algorithm the default backend signs with
pub fn keys_for(algorithm: AlgorithmId) -> Box<dyn jwtkit::KeyProvider> {
    match algorithm {
        AlgorithmId::HS256
        | AlgorithmId::HS384
        | AlgorithmId::HS512
        | AlgorithmId::KS256
        | AlgorithmId::KS384
        | AlgorithmId::KS512 => Box::new(shared_secret()),
        AlgorithmId::RS256
        | AlgorithmId::RS384
        | AlgorithmId::RS512
        | AlgorithmId::PS256
        | AlgorithmId::PS384
        | AlgorithmId::PS512 => Box::new(rsa_keys()),
        AlgorithmId::EC256 | AlgorithmId::EC384 | AlgorithmId::EC512 => {
            Box::new(ecdsa_keys(algorithm))
        }
        AlgorithmId::Ed25519 | AlgorithmId::Ed448 => Box::new(ed25519_keys()),
    }
}

/// Hand-assemble an HS256 token from raw JSON, bypassing the claims model
pub fn hs256_raw(header_json: &str, payload_json: &str) -> String {
    let signing_input = format!(
        "{}.{}",
        jwtkit::utils::base64url::encode(header_json),
        jwtkit::utils::base64url::encode(payload_json)
    );
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET).unwrap();
    mac.update(signing_input.as_bytes());
    let signature = mac.finalize().into_bytes();
    format!(
        "{signing_input}.{}",
        jwtkit::utils::base64url::encode_bytes(&signature)
    )
}
