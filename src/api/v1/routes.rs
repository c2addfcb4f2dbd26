/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /users, /roles を merge
 * - Bearer が必要な範囲をここで決める (public / protected の境界)
 */
use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    roles::{create_role, delete_role, list_roles, update_role},
    users::{
        confirm_signup, list_signup_requests, list_users, login, me, remove_user, signup,
    },
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/users/signup", post(signup))
        .route("/users/login", post(login));

    // Admin gating happens per-handler via the AdminUser extractor; the
    // middleware only establishes who the caller is.
    let protected = Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(me))
        .route("/users/signup-requests", get(list_signup_requests))
        .route("/users/confirm-signup", post(confirm_signup))
        .route("/users/remove-user", post(remove_user))
        .route("/roles", get(list_roles).post(create_role).put(update_role))
        .route("/roles/{role_id}", delete(delete_role));
    let protected = middleware::bearer_auth::apply(protected, state);

    public.merge(protected)
}
