/*
 * Responsibility
 * - パスワードの hash / verify (bcrypt)
 * - token コアからは独立 (login/signup 境界でのみ使う)
 */
use tracing::error;

use crate::error::AppError;

pub fn hash(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
        error!(error = %e, "failed to hash password");
        AppError::Internal
    })
}

pub fn verify(password: &str, hashed: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, hashed).map_err(|e| {
        error!(error = %e, "failed to verify password");
        AppError::Internal
    })
}
