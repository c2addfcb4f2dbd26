/*
 * Responsibility
 * - /users 系 handler (signup / login / me / admin 管理系)
 * - Json を dto で受け、validation → repo/service 呼び出し
 * - login だけが token を mint する (issuer の唯一の呼び出し点)
 */
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::{
    api::v1::dto::{
        tokens::TokenResponse,
        users::{
            ConfirmSignupRequest, LoginRequest, RemoveUserRequest, SignupRequest,
            SignupRequestResponse, UserResponse,
        },
    },
    api::v1::extractors::{AdminUser, CurrentUser},
    error::AppError,
    repos::{role_repo, user_repo},
    services::auth::claims::ClaimSet,
    services::password,
    state::AppState,
};

/// Self-signup queues a request for admin confirmation. Only the buyer role
/// may sign itself up.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    req.validate().map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let buyer = role_repo::get_by_name(&state.db, "buyer")
        .await?
        .ok_or(AppError::Internal)?;
    if req.role_id != buyer.id {
        return Err(AppError::Forbidden);
    }

    let hashed = password::hash(&req.password)?;

    let queued = user_repo::add_signup_request(&state.db, &req.email, &hashed, req.role_id).await?;
    if !queued {
        return Err(AppError::InvalidRequest("email already exists".to_string()));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({
            "email": req.email,
            "role_id": req.role_id,
            "is_confirmed": false,
        })),
    ))
}

/// Credential check → token mint. Unknown email, unconfirmed account and
/// wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    req.validate().map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let user = user_repo::find_by_email(&state.db, &req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !user.is_confirmed {
        return Err(AppError::Unauthorized);
    }

    if !password::verify(&req.password, &user.hashed_password)? {
        return Err(AppError::Unauthorized);
    }

    // sub is the login key; uid/role ride along as opaque extras for
    // downstream consumers.
    let mut claims = ClaimSet::for_subject(&user.email);
    claims.insert("uid", user.id.to_string());
    claims.insert("role", user.role.clone());

    let access_token = state.issuer.issue(claims, None)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.issuer.default_ttl_minutes() * 60,
    }))
}

pub async fn me(CurrentUser(identity): CurrentUser) -> Json<UserResponse> {
    Json(identity.into())
}

pub async fn list_users(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = user_repo::list(&state.db).await?;
    let res = rows
        .into_iter()
        .map(|u| UserResponse {
            id: u.id,
            email: u.email,
            role_id: u.role_id,
            role: u.role,
            is_confirmed: u.is_confirmed,
        })
        .collect();

    Ok(Json(res))
}

pub async fn list_signup_requests(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SignupRequestResponse>>, AppError> {
    let rows = user_repo::list_signup_requests(&state.db).await?;
    let res = rows
        .into_iter()
        .map(|r| SignupRequestResponse {
            id: r.id,
            email: r.email,
            role_id: r.role_id,
        })
        .collect();

    Ok(Json(res))
}

pub async fn confirm_signup(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<ConfirmSignupRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let done = user_repo::confirm_signup(&state.db, req.user_id, req.confirm).await?;
    if !done {
        return Err(AppError::InvalidRequest("could not confirm user".to_string()));
    }

    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn remove_user(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<RemoveUserRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = user_repo::delete(&state.db, req.user_id).await?;
    if !deleted {
        return Err(AppError::InvalidRequest("could not remove user".to_string()));
    }

    Ok(Json(serde_json::json!({ "ok": true })))
}
