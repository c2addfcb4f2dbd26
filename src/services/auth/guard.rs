//! Per-request policy chain consumed by route handlers:
//! verify token → resolve identity → confirmation check, plus the pure
//! role check layered on top.
//!
//! Every failure classifies into exactly one boundary outcome
//! (401 vs 403, see `AppError::from`); the variant itself is for logs only.

use std::sync::Arc;

use thiserror::Error;

use super::identity::{AuthenticatedIdentity, IdentityResolver, ResolverError};
use super::verifier::{TokenVerifier, VerifyError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token verification failed: {0}")]
    InvalidToken(#[from] VerifyError),

    #[error("token payload has no subject")]
    MissingSubject,

    #[error("no identity for token subject")]
    UnknownSubject,

    #[error("account not confirmed")]
    NotConfirmed,

    #[error("{0} privileges required")]
    RoleRequired(&'static str),

    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

pub struct AuthGuard {
    verifier: TokenVerifier,
    resolver: Arc<dyn IdentityResolver>,
}

impl AuthGuard {
    pub fn new(verifier: TokenVerifier, resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { verifier, resolver }
    }

    /// Full chain: token text → trusted identity.
    ///
    /// A failed verification is final for this request; there is no retry.
    /// The caller must re-authenticate to obtain a new token.
    pub async fn resolve_identity(
        &self,
        token: &str,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        let claims = self.verifier.verify(token)?;

        let subject = claims.subject().ok_or(AuthError::MissingSubject)?;

        let identity = self
            .resolver
            .lookup_by_subject(subject)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        // Valid credential, but the account is not activated yet: a
        // distinct failure class from authentication (403, not 401).
        if !identity.is_confirmed {
            return Err(AuthError::NotConfirmed);
        }

        Ok(identity)
    }
}

/// Case-insensitive role gate. Pure function, no I/O.
pub fn require_role(
    identity: AuthenticatedIdentity,
    role: &'static str,
) -> Result<AuthenticatedIdentity, AuthError> {
    if identity.role.eq_ignore_ascii_case(role) {
        Ok(identity)
    } else {
        Err(AuthError::RoleRequired(role))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::services::auth::claims::ClaimSet;
    use crate::services::auth::issuer::TokenIssuer;

    const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

    /// In-memory resolver keyed by email.
    struct MapResolver {
        users: HashMap<String, AuthenticatedIdentity>,
    }

    #[async_trait]
    impl IdentityResolver for MapResolver {
        async fn lookup_by_subject(
            &self,
            subject: &str,
        ) -> Result<Option<AuthenticatedIdentity>, ResolverError> {
            Ok(self.users.get(subject).cloned())
        }
    }

    fn identity(email: &str, role: &str, is_confirmed: bool) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            role_id: 1,
            role: role.to_string(),
            is_confirmed,
        }
    }

    fn guard_with(users: Vec<AuthenticatedIdentity>) -> AuthGuard {
        let users = users.into_iter().map(|u| (u.email.clone(), u)).collect();
        AuthGuard::new(
            TokenVerifier::new(SECRET),
            Arc::new(MapResolver { users }),
        )
    }

    fn mint(sub: &str) -> String {
        TokenIssuer::new(SECRET, 60)
            .issue(ClaimSet::for_subject(sub), None)
            .unwrap()
    }

    #[tokio::test]
    async fn test_resolves_confirmed_identity() {
        let guard = guard_with(vec![identity("alice@example.com", "buyer", true)]);
        let token = mint("alice@example.com");

        let resolved = guard.resolve_identity(&token).await.unwrap();
        assert_eq!(resolved.email, "alice@example.com");
        assert_eq!(resolved.role, "buyer");
    }

    #[tokio::test]
    async fn test_rejects_token_without_subject() {
        let guard = guard_with(vec![identity("alice@example.com", "buyer", true)]);
        let token = TokenIssuer::new(SECRET, 60)
            .issue(ClaimSet::new(), None)
            .unwrap();

        match guard.resolve_identity(&token).await {
            Err(AuthError::MissingSubject) => {}
            other => panic!("expected MissingSubject, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejects_unknown_subject() {
        let guard = guard_with(vec![]);
        let token = mint("ghost@example.com");

        match guard.resolve_identity(&token).await {
            Err(AuthError::UnknownSubject) => {}
            other => panic!("expected UnknownSubject, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unconfirmed_account_is_forbidden_not_unauthenticated() {
        let guard = guard_with(vec![identity("alice@example.com", "buyer", false)]);
        let token = mint("alice@example.com");

        match guard.resolve_identity(&token).await {
            Err(AuthError::NotConfirmed) => {}
            other => panic!("expected NotConfirmed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_before_lookup() {
        let guard = guard_with(vec![identity("alice@example.com", "buyer", true)]);

        // Issued 61 minutes in the past with a 60-minute TTL.
        let token = TokenIssuer::new(SECRET, 60)
            .issue_at(
                ClaimSet::for_subject("alice@example.com"),
                None,
                Utc::now() - Duration::minutes(61),
            )
            .unwrap();

        match guard.resolve_identity(&token).await {
            Err(AuthError::InvalidToken(VerifyError::Expired)) => {}
            other => panic!("expected Expired, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let guard = guard_with(vec![]);

        match guard.resolve_identity("not-a-token").await {
            Err(AuthError::InvalidToken(VerifyError::MalformedStructure)) => {}
            other => panic!("expected MalformedStructure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_token_lifecycle_end_to_end() {
        // Alice is on file but not yet confirmed.
        let guard = guard_with(vec![identity("alice@example.com", "buyer", false)]);
        let now = Utc::now();

        let token = TokenIssuer::new(SECRET, 60)
            .issue_at(ClaimSet::for_subject("alice@example.com"), Some(60), now)
            .unwrap();

        // Fresh token verifies...
        let verifier = TokenVerifier::new(SECRET);
        assert!(verifier.verify_at(&token, now).is_ok());

        // ...and is dead 61 minutes later.
        assert_eq!(
            verifier.verify_at(&token, now + Duration::minutes(61)),
            Err(VerifyError::Expired)
        );

        // Within its lifetime the credential is accepted, but the account
        // is not activated: forbidden, not unauthenticated.
        match guard.resolve_identity(&token).await {
            Err(AuthError::NotConfirmed) => {}
            other => panic!("expected NotConfirmed, got {other:?}"),
        }
    }

    #[test]
    fn test_require_role_is_case_insensitive() {
        let admin = identity("root@example.com", "Admin", true);
        assert!(require_role(admin, "admin").is_ok());

        let buyer = identity("alice@example.com", "buyer", true);
        match require_role(buyer, "admin") {
            Err(AuthError::RoleRequired("admin")) => {}
            other => panic!("expected RoleRequired, got {other:?}"),
        }
    }
}
