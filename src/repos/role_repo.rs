/*
 * Responsibility
 * - roles テーブル向け SQLx 操作 (admin の role 管理 + signup 時の引き当て)
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct RoleRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

pub async fn get_by_name(db: &PgPool, name: &str) -> Result<Option<RoleRow>, RepoError> {
    let row = sqlx::query_as::<_, RoleRow>(
        r#"
        SELECT id, name, description
        FROM roles
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list(db: &PgPool) -> Result<Vec<RoleRow>, RepoError> {
    let rows = sqlx::query_as::<_, RoleRow>(
        r#"
        SELECT id, name, description
        FROM roles
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    description: Option<&str>,
) -> Result<RoleRow, RepoError> {
    let row = sqlx::query_as::<_, RoleRow>(
        r#"
        INSERT INTO roles (name, description)
        VALUES ($1, $2)
        RETURNING id, name, description
        "#,
    )
    .bind(name)
    .bind(description)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    role_id: i32,
    name: &str,
    description: Option<&str>,
) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        UPDATE roles
        SET name = $2, description = $3
        WHERE id = $1
        "#,
    )
    .bind(role_id)
    .bind(name)
    .bind(description)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(db: &PgPool, role_id: i32) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM roles
        WHERE id = $1
        "#,
    )
    .bind(role_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
