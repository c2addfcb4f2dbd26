/*
 * Responsibility
 * - Users の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::auth::identity::AuthenticatedIdentity;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub role_id: i32,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("email is required");
        }
        if self.password.len() < 8 {
            return Err("password must be at least 8 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("email and password are required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfirmSignupRequest {
    pub user_id: Uuid,
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct RemoveUserRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role_id: i32,
    pub role: String,
    pub is_confirmed: bool,
}

impl From<AuthenticatedIdentity> for UserResponse {
    fn from(identity: AuthenticatedIdentity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            role_id: identity.role_id,
            role: identity.role,
            is_confirmed: identity.is_confirmed,
        }
    }
}

/// Pending signup as shown to admins. No password material leaves the
/// repo layer through this type.
#[derive(Debug, Serialize)]
pub struct SignupRequestResponse {
    pub id: Uuid,
    pub email: String,
    pub role_id: i32,
}
