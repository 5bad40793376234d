// Internal modules
mod parsed;
mod signer;
mod verified;

// Public API exports
pub use signer::TokenSigner;
pub use verified::VerifiedToken;

// Internal types (used by the verifier but not exposed in public API)
pub(crate) use parsed::ParsedToken;
