/*!
 * Stateless bearer-token subsystem.
 *
 * Responsibility:
 * - 自前の三分割トークン (header.payload.signature) の発行・検証
 * - 検証済み subject → AuthenticatedIdentity の解決 (guard)
 * - HTTP / sqlx 依存は identity::sql と factory に閉じ込める
 *
 * Public API:
 * - TokenIssuer / TokenVerifier / AuthGuard
 * - ClaimSet / ClaimValue
 * - IdentityResolver (seam for the user store)
 */
pub mod claims;
pub mod codec;
pub mod factory;
pub mod guard;
pub mod identity;
pub mod issuer;
pub mod signer;
pub mod token_codec;
pub mod verifier;

/// The single signing algorithm this service implements.
pub const SUPPORTED_ALGORITHM: &str = "HS256";
