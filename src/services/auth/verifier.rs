//! The inverse of issuance, with strict failure semantics.
//!
//! Single pass, no retries:
//! 1. split into three segments
//! 2. recompute the tag over the original `<header>.<payload>` text and
//!    compare constant-time against the provided signature
//! 3. only then decode and parse the payload
//! 4. `now >= exp` check (`exp` absent = never expires)
//!
//! The signature is always checked before any semantic field is trusted, so
//! an attacker-modified payload is never acted on, even transiently.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::claims::ClaimSet;
use super::codec;
use super::signer;
use super::token_codec;

/// Closed set of rejection reasons. Retained for logging only; the HTTP
/// boundary collapses all three into one generic 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("malformed token structure")]
    MalformedStructure,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("token expired")]
    Expired,
}

/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    secret: Vec<u8>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, token: &str) -> Result<ClaimSet, VerifyError> {
        self.verify_at(token, Utc::now())
    }

    /// Verification against an explicit clock. Everything here is a pure
    /// function of (token, secret, now); `verify` just plugs in the wall
    /// clock.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, VerifyError> {
        let parts = token_codec::split(token)?;

        let expected = signer::sign(parts.signing_input().as_bytes(), &self.secret);
        let provided =
            codec::decode(parts.signature).map_err(|_| VerifyError::MalformedStructure)?;
        if !signer::tags_match(&expected, &provided) {
            return Err(VerifyError::SignatureMismatch);
        }

        let payload =
            codec::decode(parts.payload).map_err(|_| VerifyError::MalformedStructure)?;
        // Parse details are not leaked upstream; any syntax problem is just
        // a malformed token.
        let claims: ClaimSet =
            serde_json::from_slice(&payload).map_err(|_| VerifyError::MalformedStructure)?;

        if let Some(exp) = claims.exp {
            if now.timestamp() >= exp {
                return Err(VerifyError::Expired);
            }
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::services::auth::issuer::TokenIssuer;

    const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, 60)
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET)
    }

    #[test]
    fn test_round_trip() {
        let now = Utc::now();
        let mut claims = ClaimSet::for_subject("alice@example.com");
        claims.insert("uid", "42");
        claims.insert("role", "buyer");

        let token = issuer().issue_at(claims.clone(), None, now).unwrap();
        let verified = verifier().verify_at(&token, now).unwrap();

        // Exactly the input claims plus the injected exp.
        claims.exp = Some((now + Duration::minutes(60)).timestamp());
        assert_eq!(verified, claims);
    }

    #[test]
    fn test_cross_key_rejection() {
        let now = Utc::now();
        let token = issuer()
            .issue_at(ClaimSet::for_subject("a@b.c"), None, now)
            .unwrap();

        let other = TokenVerifier::new(&b"another-secret"[..]);
        assert_eq!(
            other.verify_at(&token, now),
            Err(VerifyError::SignatureMismatch)
        );
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let token = issuer()
            .issue_at(ClaimSet::for_subject("a@b.c"), Some(60), now)
            .unwrap();

        let exp = now + Duration::minutes(60);
        // now == exp: already dead (the comparison is >=).
        assert_eq!(
            verifier().verify_at(&token, exp),
            Err(VerifyError::Expired)
        );
        // One second before exp: still valid.
        assert!(verifier().verify_at(&token, exp - Duration::seconds(1)).is_ok());
        // One second past exp: dead.
        assert_eq!(
            verifier().verify_at(&token, exp + Duration::seconds(1)),
            Err(VerifyError::Expired)
        );
    }

    #[test]
    fn test_missing_exp_never_expires() {
        // The issuer always injects exp; a foreign mint with the same secret
        // may omit it, which reads as "never expires".
        let payload = br#"{"sub":"a@b.c"}"#;
        let header = br#"{"alg":"HS256","typ":"JWT"}"#;
        let token = crate::services::auth::token_codec::build(header, payload, SECRET);

        let far_future = Utc::now() + Duration::days(365 * 100);
        let claims = verifier().verify_at(&token, far_future).unwrap();
        assert_eq!(claims.subject(), Some("a@b.c"));
    }

    #[test]
    fn test_tampered_payload_is_signature_mismatch() {
        let now = Utc::now();
        let token = issuer()
            .issue_at(ClaimSet::for_subject("a@b.c"), None, now)
            .unwrap();

        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        // Swap one payload character for a different alphabet member: the
        // encoding stays valid, so the failure must be the signature.
        let payload = &mut parts[1];
        let replacement = if payload.starts_with('A') { "B" } else { "A" };
        payload.replace_range(0..1, replacement);

        let tampered = parts.join(".");
        assert_eq!(
            verifier().verify_at(&tampered, now),
            Err(VerifyError::SignatureMismatch)
        );
    }

    #[test]
    fn test_tampered_header_is_signature_mismatch() {
        let now = Utc::now();
        let token = issuer()
            .issue_at(ClaimSet::for_subject("a@b.c"), None, now)
            .unwrap();

        // The header text is signed too; changing it invalidates the tag
        // even though the claims are untouched.
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let header = &mut parts[0];
        let replacement = if header.starts_with('A') { "B" } else { "A" };
        header.replace_range(0..1, replacement);

        let tampered = parts.join(".");
        assert_eq!(
            verifier().verify_at(&tampered, now),
            Err(VerifyError::SignatureMismatch)
        );
    }

    #[test]
    fn test_tampered_signature_never_validates() {
        let now = Utc::now();
        let token = issuer()
            .issue_at(ClaimSet::for_subject("a@b.c"), None, now)
            .unwrap();

        let (rest, sig) = token.rsplit_once('.').unwrap();
        for (i, c) in sig.char_indices() {
            let replacement = if c == 'A' { 'B' } else { 'A' };
            let mut mutated = sig.to_string();
            mutated.replace_range(i..i + 1, &replacement.to_string());
            let tampered = format!("{rest}.{mutated}");

            let outcome = verifier().verify_at(&tampered, now);
            // Either the tag no longer matches, or the mutation broke the
            // base64 length/alphabet. Never Valid.
            assert!(
                matches!(
                    outcome,
                    Err(VerifyError::SignatureMismatch) | Err(VerifyError::MalformedStructure)
                ),
                "position {i} validated"
            );
        }
    }

    #[test]
    fn test_structural_rejection() {
        let now = Utc::now();
        for bad in ["", "a", "a.b", "a.b.c.d", ".b.c", "a..c", "a.b."] {
            assert_eq!(
                verifier().verify_at(bad, now),
                Err(VerifyError::MalformedStructure),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_garbage_payload_behind_valid_signature() {
        // Correctly signed, but the payload is not a JSON object: the codec
        // layer passes, the parse step classifies it as malformed.
        let token = crate::services::auth::token_codec::build(
            br#"{"alg":"HS256","typ":"JWT"}"#,
            b"not json",
            SECRET,
        );
        assert_eq!(
            verifier().verify_at(&token, Utc::now()),
            Err(VerifyError::MalformedStructure)
        );
    }
}
