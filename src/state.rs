/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::{guard::AuthGuard, issuer::TokenIssuer};

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub issuer: Arc<TokenIssuer>,
    pub auth: Arc<AuthGuard>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, issuer: Arc<TokenIssuer>, auth: Arc<AuthGuard>) -> Self {
        Self { db, issuer, auth }
    }
}
