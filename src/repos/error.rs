/*
 * Responsibility
 * - repos 層の共通エラー
 * - sqlx::Error を AppError に変換しやすい形で包む
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}
