//! Assembly and disassembly of the three-segment token text:
//! `b64url(header_json).b64url(payload_json).b64url(tag)`.
//!
//! The tag covers the exact `<header_b64>.<payload_b64>` text, not the
//! decoded structs. Re-encoding the same JSON differently and re-signing
//! yields a different but equally valid token; there is no canonical form.

use super::codec;
use super::signer;
use super::verifier::VerifyError;

pub struct TokenParts<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl TokenParts<'_> {
    /// The exact text the signature was computed over.
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }
}

pub fn build(header_json: &[u8], payload_json: &[u8], secret: &[u8]) -> String {
    let header_b64 = codec::encode(header_json);
    let payload_b64 = codec::encode(payload_json);
    let signing_input = format!("{header_b64}.{payload_b64}");

    let tag = signer::sign(signing_input.as_bytes(), secret);
    let signature_b64 = codec::encode(&tag);

    format!("{signing_input}.{signature_b64}")
}

/// Exactly two separators, three non-empty segments. Anything else is a
/// malformed token, never a partial parse.
pub fn split(token: &str) -> Result<TokenParts<'_>, VerifyError> {
    let mut segments = token.split('.');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok(TokenParts {
                header,
                payload,
                signature,
            })
        }
        _ => Err(VerifyError::MalformedStructure),
    }
}
