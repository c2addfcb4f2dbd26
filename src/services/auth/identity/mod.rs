/*!
 * Identity resolution seam.
 *
 * Responsibility:
 * - 検証済み subject → 完全な identity レコードの引き当て
 * - DB 依存は sql 実装に閉じ込め、guard からは trait 越しに使う
 *
 * Public API:
 * - AuthenticatedIdentity
 * - IdentityResolver / ResolverError
 * - SqlIdentityResolver
 */
mod resolver;
mod sql;

pub use resolver::{AuthenticatedIdentity, IdentityResolver, ResolverError};
pub use sql::SqlIdentityResolver;
