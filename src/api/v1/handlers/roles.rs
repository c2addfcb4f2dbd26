/*
 * Responsibility
 * - /roles 系 CRUD handler (すべて admin 専用)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::roles::{CreateRoleRequest, RoleResponse, UpdateRoleRequest},
    api::v1::extractors::AdminUser,
    error::AppError,
    repos::role_repo,
    state::AppState,
};

pub async fn list_roles(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RoleResponse>>, AppError> {
    let rows = role_repo::list(&state.db).await?;
    let res = rows
        .into_iter()
        .map(|r| RoleResponse {
            id: r.id,
            name: r.name,
            description: r.description,
        })
        .collect();

    Ok(Json(res))
}

pub async fn create_role(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleResponse>), AppError> {
    req.validate().map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let row = role_repo::create(&state.db, &req.name, req.description.as_deref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RoleResponse {
            id: row.id,
            name: row.name,
            description: row.description,
        }),
    ))
}

pub async fn update_role(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<bool>, AppError> {
    req.validate().map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let updated =
        role_repo::update(&state.db, req.id, &req.name, req.description.as_deref()).await?;
    if !updated {
        return Err(AppError::InvalidRequest("could not update role".to_string()));
    }

    Ok(Json(true))
}

pub async fn delete_role(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(role_id): Path<i32>,
) -> Result<Json<bool>, AppError> {
    let deleted = role_repo::delete(&state.db, role_id).await?;
    if !deleted {
        return Err(AppError::InvalidRequest("could not delete role".to_string()));
    }

    Ok(Json(true))
}
