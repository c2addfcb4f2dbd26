/*!
 * Authenticated-request extractors
 *
 * Responsibility:
 * - middleware が extensions に入れた AuthenticatedIdentity を handler に渡す
 * - admin 専用 handler のための role チェック付き extractor
 *
 * Public API:
 * - CurrentUser
 * - AdminUser
 */
mod current_user;

pub use current_user::{AdminUser, CurrentUser};
