/// Authorization gate primitives
///
/// The API server installs one JWT middleware layer on every protected
/// route. This module holds the pieces that layer is built from: bearer
/// token extraction, the error taxonomy, and the [`AuthContext`] the
/// layer injects into request extensions.
///
/// Role checks stay in the handlers (403 on mismatch); the gate only
/// proves identity (401 on failure).
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use wellpath_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Account: {}, role: {}", auth.account_id, auth.role.as_str())
/// }
/// ```
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;
use crate::models::account::Role;

/// Error type for the authorization gate
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header on a protected route
    #[error("Not authorized, no token")]
    MissingCredentials,

    /// Header present but not a Bearer scheme
    #[error("Expected Bearer token")]
    InvalidFormat,

    /// Token failed validation (signature, expiry, issuer)
    #[error("Not authorized, token failed: {0}")]
    InvalidToken(String),
}

/// Decoded identity attached to authenticated requests
///
/// Handlers extract this with Axum's `Extension` extractor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated account ID
    pub account_id: Uuid,

    /// Role carried in the token
    pub role: Role,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            account_id: claims.sub,
            role: claims.role,
        }
    }

    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }

    pub fn is_provider(&self) -> bool {
        self.role == Role::Provider
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value
pub fn extract_bearer(header_value: &str) -> Result<&str, AuthError> {
    header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_bearer_wrong_scheme() {
        assert!(matches!(
            extract_bearer("Basic dXNlcjpwYXNz"),
            Err(AuthError::InvalidFormat)
        ));
        assert!(matches!(
            extract_bearer("bearer abc"), // scheme is case-sensitive
            Err(AuthError::InvalidFormat)
        ));
    }

    #[test]
    fn test_context_from_claims() {
        let claims = Claims::new(Uuid::new_v4(), Role::Provider);
        let ctx = AuthContext::from_claims(&claims);

        assert_eq!(ctx.account_id, claims.sub);
        assert!(ctx.is_provider());
        assert!(!ctx.is_patient());
    }
}
