/// Factory: build the token components from application `Config`.
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::services::auth::guard::AuthGuard;
use crate::services::auth::identity::SqlIdentityResolver;
use crate::services::auth::issuer::TokenIssuer;
use crate::services::auth::verifier::TokenVerifier;

/// Issuer and guard share one immutable secret, loaded once at startup and
/// never rotated at runtime in this design.
pub fn build_auth(config: &Config, db: &PgPool) -> (Arc<TokenIssuer>, Arc<AuthGuard>) {
    let secret = config.jwt_secret.as_bytes();

    let issuer = Arc::new(TokenIssuer::new(secret, config.jwt_expires_minutes));

    let verifier = TokenVerifier::new(secret);
    let resolver = Arc::new(SqlIdentityResolver::new(db.clone()));
    let guard = Arc::new(AuthGuard::new(verifier, resolver));

    (issuer, guard)
}
