/// API route handlers
///
/// One module per resource:
///
/// - `health`: health check
/// - `auth`: registration and login
/// - `profile`: the authenticated account's own record
/// - `patients`: unauthenticated patient seeding
/// - `goals`: patient goal tracking and provider oversight
/// - `tips`: random wellness tip

pub mod auth;
pub mod goals;
pub mod health;
pub mod patients;
pub mod profile;
pub mod tips;
