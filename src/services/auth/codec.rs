//! Binary-to-text transport for token segments.
//!
//! base64url without padding: never emits `.` (the segment separator), `=`,
//! or anything needing further escaping, so segments can be joined and split
//! on `.` alone.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Inverse of [`encode`]. Fails on characters outside the alphabet or on a
/// length no padded base64 string could have; callers classify either case
/// as a malformed token.
pub fn decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let cases: &[&[u8]] = &[
            b"",
            b"a",
            b"ab",
            b"abc",
            b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}",
            &[0x00, 0xff, 0xfe, 0x80, 0x7f],
        ];
        for &input in cases {
            let encoded = encode(input);
            assert_eq!(decode(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn test_no_padding_and_no_separator() {
        // Lengths 0..=8 cover every padding case of the underlying encoding.
        for len in 0..=8 {
            let input = vec![0xa5u8; len];
            let encoded = encode(&input);
            assert!(!encoded.contains('='), "padding leaked: {encoded}");
            assert!(!encoded.contains('.'), "separator leaked: {encoded}");
        }
    }

    #[test]
    fn test_rejects_foreign_alphabet() {
        // '+' and '/' belong to standard base64, not the url-safe alphabet.
        assert!(decode("ab+c").is_err());
        assert!(decode("ab/c").is_err());
        assert!(decode("ab.c").is_err());
    }

    #[test]
    fn test_rejects_impossible_length() {
        // A single trailing symbol can never come out of base64.
        assert!(decode("A").is_err());
        assert!(decode("AAAAA").is_err());
    }
}
