//! Bearer トークン検証 → AuthenticatedIdentity を extensions に入れる
//!
//! - `Authorization: Bearer <token>` を受け取り、guard の解決チェーン
//!   (検証 → identity 引き当て → confirmation チェック) を通す
//! - 成功時は request extensions に identity を格納し、extractor から使う
//! - 失敗の内訳はログにのみ出す。レスポンスは AppError 経由の generic な
//!   401/403 だけ (どのステップで落ちたかを返さない)
//! - role チェックは handler/extractor 側 (必要な範囲だけ)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// 認証を掛けたい Router にこの middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = middleware::bearer_auth::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、
    // `from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    // 署名・期限・identity の検証は guard 側で実施
    let identity = match state.auth.resolve_identity(token).await {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "bearer authentication failed"
            );
            return Err(err.into());
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
