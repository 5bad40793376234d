pub mod base64url;
pub mod time;

pub use base64url::{decode_bytes, decode_string, encode, encode_bytes};
pub use time::now_seconds;
