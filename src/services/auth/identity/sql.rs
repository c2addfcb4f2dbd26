use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::user_repo;

use super::resolver::{AuthenticatedIdentity, IdentityResolver, ResolverError};

/// Production resolver over the users table. Read-only: the auth chain
/// never mutates identity state.
#[derive(Clone)]
pub struct SqlIdentityResolver {
    db: PgPool,
}

impl SqlIdentityResolver {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityResolver for SqlIdentityResolver {
    async fn lookup_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<AuthenticatedIdentity>, ResolverError> {
        let row = user_repo::find_by_email(&self.db, subject).await?;

        Ok(row.map(|u| AuthenticatedIdentity {
            id: u.id,
            email: u.email,
            role_id: u.role_id,
            role: u.role,
            is_confirmed: u.is_confirmed,
        }))
    }
}
