/*
 * Responsibility
 * - users / user_signup_requests テーブル向け SQLx 操作
 * - PgPool を受け取り、読み取り (identity resolver 用) と signup フローを提供
 * - DB エラーは RepoError に変換して返す
 */
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub role_id: i32,
    pub role: String,
    pub is_confirmed: bool,
}

#[derive(Debug, FromRow)]
pub struct SignupRequestRow {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub role_id: i32,
}

/// The identity-resolver read path: one row by login key, with the role
/// name joined in.
pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT u.id, u.email, u.hashed_password, u.role_id, r.name AS role, u.is_confirmed
        FROM users u
        JOIN roles r ON r.id = u.role_id
        WHERE u.email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list(db: &PgPool) -> Result<Vec<UserRow>, RepoError> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT u.id, u.email, u.hashed_password, u.role_id, r.name AS role, u.is_confirmed
        FROM users u
        JOIN roles r ON r.id = u.role_id
        ORDER BY u.email
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn delete(db: &PgPool, user_id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Queue a signup for admin confirmation. Returns false when the email is
/// already taken, either by a user or by a pending request.
pub async fn add_signup_request(
    db: &PgPool,
    email: &str,
    hashed_password: &str,
    role_id: i32,
) -> Result<bool, RepoError> {
    let taken: Option<i32> = sqlx::query_scalar(
        r#"
        SELECT 1
        FROM users
        WHERE email = $1
        UNION ALL
        SELECT 1
        FROM user_signup_requests
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    if taken.is_some() {
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO user_signup_requests (id, email, hashed_password, role_id)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(hashed_password)
    .bind(role_id)
    .execute(db)
    .await?;

    Ok(true)
}

pub async fn list_signup_requests(db: &PgPool) -> Result<Vec<SignupRequestRow>, RepoError> {
    let rows = sqlx::query_as::<_, SignupRequestRow>(
        r#"
        SELECT id, email, hashed_password, role_id
        FROM user_signup_requests
        ORDER BY email
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Approve (`confirm = true`) moves the pending request into `users` as a
/// confirmed account, carrying the stored hash verbatim; reject just drops
/// the request. Returns false when no such request exists.
pub async fn confirm_signup(
    db: &PgPool,
    request_id: Uuid,
    confirm: bool,
) -> Result<bool, RepoError> {
    let mut txn = db.begin().await?;

    let request = sqlx::query_as::<_, SignupRequestRow>(
        r#"
        SELECT id, email, hashed_password, role_id
        FROM user_signup_requests
        WHERE id = $1
        "#,
    )
    .bind(request_id)
    .fetch_optional(&mut *txn)
    .await?;

    let Some(request) = request else {
        txn.rollback().await?;
        return Ok(false);
    };

    if confirm {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, hashed_password, role_id, is_confirmed)
            VALUES ($1, $2, $3, $4, true)
            "#,
        )
        .bind(request.id)
        .bind(&request.email)
        .bind(&request.hashed_password)
        .bind(request.role_id)
        .execute(&mut *txn)
        .await?;
    }

    sqlx::query(
        r#"
        DELETE FROM user_signup_requests
        WHERE id = $1
        "#,
    )
    .bind(request_id)
    .execute(&mut *txn)
    .await?;

    txn.commit().await?;
    Ok(true)
}
