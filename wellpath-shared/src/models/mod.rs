/// Database models for WellPath
///
/// # Models
///
/// - `account`: role-tagged user accounts (patient | provider)
/// - `goal`: goals embedded in patient accounts
/// - `tip`: standalone wellness tips
///
/// # Example
///
/// ```no_run
/// use wellpath_shared::models::account::{Account, CreateAccount, Role};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let account = Account::create(
///     &pool,
///     CreateAccount {
///         name: "Jane Doe".to_string(),
///         email: "jane@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         role: Role::Patient,
///         age: None,
///         allergies: vec![],
///         medications: vec![],
///         specialty: None,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod account;
pub mod goal;
pub mod tip;
