//! Token issuance: application claims + configured lifetime → signed token.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::error;

use crate::error::AppError;

use super::SUPPORTED_ALGORITHM;
use super::claims::ClaimSet;
use super::token_codec;

/// Fixed token header. Serialized field order gives exactly
/// `{"alg":"HS256","typ":"JWT"}`.
#[derive(Debug, Serialize)]
struct TokenHeader {
    alg: &'static str,
    typ: &'static str,
}

/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Vec<u8>,
    default_ttl_minutes: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("default_ttl_minutes", &self.default_ttl_minutes)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: impl Into<Vec<u8>>, default_ttl_minutes: u64) -> Self {
        Self {
            secret: secret.into(),
            default_ttl_minutes,
        }
    }

    pub fn default_ttl_minutes(&self) -> u64 {
        self.default_ttl_minutes
    }

    /// Mint a token for `claims`, expiring `ttl_minutes` (or the configured
    /// default) from now. A caller-supplied `exp` is always overwritten.
    pub fn issue(&self, claims: ClaimSet, ttl_minutes: Option<u64>) -> Result<String, AppError> {
        self.issue_at(claims, ttl_minutes, Utc::now())
    }

    /// Issuance against an explicit clock (tests pin `now` here).
    pub fn issue_at(
        &self,
        mut claims: ClaimSet,
        ttl_minutes: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let ttl = ttl_minutes.unwrap_or(self.default_ttl_minutes);
        let exp = now + Duration::minutes(ttl as i64);
        claims.exp = Some(exp.timestamp());

        let header = TokenHeader {
            alg: SUPPORTED_ALGORITHM,
            typ: "JWT",
        };
        let header_json = serde_json::to_vec(&header).map_err(|e| {
            error!(error = %e, "failed to serialize token header");
            AppError::Internal
        })?;
        let payload_json = serde_json::to_vec(&claims).map_err(|e| {
            error!(error = %e, "failed to serialize token claims");
            AppError::Internal
        })?;

        Ok(token_codec::build(&header_json, &payload_json, &self.secret))
    }
}
