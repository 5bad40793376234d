use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::utils::base64url;

/// A compact token split into its segments, with the header decoded
///
/// The payload and signature stay encoded until the verifier asks for them,
/// so no payload claim is read before the signature is checked.
pub(crate) struct ParsedToken<'a> {
    header: Claims,
    signing_input: &'a str,
    payload_b64: &'a str,
    signature_b64: &'a str,
}

impl<'a> ParsedToken<'a> {
    /// Split a compact token and decode its header
    pub(crate) fn parse(token: &'a str) -> Result<Self> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::MalformedToken(format!(
                "token too large: {} bytes (maximum: {} bytes)",
                token.len(),
                MAX_TOKEN_LENGTH
            )));
        }

        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::MalformedToken(format!(
                "expected 3 segments, found {}",
                token.split('.').count()
            )));
        };

        let header_json = base64url::decode_bytes(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let header = Claims::from_json(&header_json)?;

        Ok(Self {
            header,
            signing_input: &token[..header_b64.len() + 1 + payload_b64.len()],
            payload_b64,
            signature_b64,
        })
    }

    pub(crate) fn header(&self) -> &Claims {
        &self.header
    }

    /// `header.payload`, exactly as received
    pub(crate) fn signing_input(&self) -> &'a str {
        self.signing_input
    }

    pub(crate) fn decode_signature(&self) -> Result<Vec<u8>> {
        base64url::decode_bytes(self.signature_b64, MAX_DECODED_SIGNATURE_SIZE)
    }

    /// Decode the payload; call only after the signature has been checked
    pub(crate) fn decode_payload(&self) -> Result<Claims> {
        let payload_json = base64url::decode_bytes(self.payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
        Claims::from_json(&payload_json)
    }

    pub(crate) fn into_header(self) -> Claims {
        self.header
    }
}
