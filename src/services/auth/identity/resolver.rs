use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::repos::error::RepoError;

/// The resolved identity after full verification.
///
/// Created fresh per request by the guard, owned by the request-handling
/// context, never cached by the core.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedIdentity {
    pub id: Uuid,
    pub email: String,
    pub role_id: i32,
    pub role: String,
    pub is_confirmed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("identity store error: {0}")]
    Store(#[from] RepoError),
}

/// Read path into the user store. The single suspension point of the auth
/// chain; the token core itself never does I/O.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// `Ok(None)` means "no such identity" (an auth outcome, not an error).
    async fn lookup_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<AuthenticatedIdentity>, ResolverError>;
}
