/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: HS256 bearer token issuing and validation (24h expiry)
/// - [`middleware`]: auth context and bearer extraction for the HTTP gate
///
/// # Example
///
/// ```no_run
/// use wellpath_shared::auth::password::{hash_password, verify_password};
/// use wellpath_shared::auth::jwt::{create_token, Claims};
/// use wellpath_shared::models::account::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), Role::Patient);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
