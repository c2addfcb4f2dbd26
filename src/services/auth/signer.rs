//! Keyed message authentication for token signing.
//!
//! HMAC-SHA256 over the server-held secret. There is deliberately no
//! standalone `verify`: verification is always recompute-then-compare, and
//! the comparison is constant time so a forged tag cannot be probed
//! byte-by-byte through response timing.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Tag length fixed by SHA-256.
pub const TAG_LEN: usize = 32;

/// Deterministic: the same (message, secret) always yields the same tag.
pub fn sign(message: &[u8], secret: &[u8]) -> [u8; TAG_LEN] {
    // Per RFC 2104, HMAC accepts keys of any size (keys > block size are
    // hashed first), so new_from_slice cannot fail for any &[u8].
    let mut mac = HmacSha256::new_from_slice(secret)
        .unwrap_or_else(|_| HmacSha256::new_from_slice(&[0u8; TAG_LEN]).unwrap());
    mac.update(message);

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}

/// Constant-time tag comparison. The comparison walks the full tag length
/// regardless of where the first mismatch sits; only the (public) length
/// check can exit early.
pub fn tags_match(expected: &[u8; TAG_LEN], provided: &[u8]) -> bool {
    if provided.len() != TAG_LEN {
        return false;
    }
    expected.as_slice().ct_eq(provided).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_and_fixed_length() {
        let a = sign(b"header.payload", b"secret");
        let b = sign(b"header.payload", b"secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), TAG_LEN);
    }

    #[test]
    fn test_message_sensitivity() {
        let a = sign(b"header.payload", b"secret");
        let b = sign(b"header.payloae", b"secret");
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_sensitivity() {
        let a = sign(b"header.payload", b"secret-A");
        let b = sign(b"header.payload", b"secret-B");
        assert_ne!(a, b);
    }

    #[test]
    fn test_tags_match() {
        let tag = sign(b"msg", b"k");
        assert!(tags_match(&tag, &tag));

        let mut tampered = tag;
        tampered[0] ^= 0x01;
        assert!(!tags_match(&tag, &tampered));

        // Wrong length never matches, even as a prefix.
        assert!(!tags_match(&tag, &tag[..TAG_LEN - 1]));
        assert!(!tags_match(&tag, &[]));
    }
}
