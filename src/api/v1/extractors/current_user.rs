use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::guard;
use crate::services::auth::identity::AuthenticatedIdentity;
use crate::state::AppState;

/// Handler で認証済み identity を受け取るための extractor。
/// bearer_auth middleware が request.extensions() に insert 済みである前提。
/// 見つからない場合は 401 (認証がかかってない・ミドルウェア未設定)。
pub struct CurrentUser(pub AuthenticatedIdentity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// CurrentUser + admin role チェック。失敗時は generic な 403。
pub struct AdminUser(pub AuthenticatedIdentity);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;

        match guard::require_role(identity, "admin") {
            Ok(identity) => Ok(AdminUser(identity)),
            Err(err) => {
                tracing::warn!(error = %err, "role check failed");
                Err(err.into())
            }
        }
    }
}
