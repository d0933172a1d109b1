/// Account model and database operations
///
/// One `accounts` row per user. The role column is a tagged variant
/// (patient | provider) and decides which specialized columns are
/// meaningful: patients carry age, allergies, medications and an embedded
/// goal list; providers carry a specialty and a patient reference list.
///
/// Role is immutable after creation. Email uniqueness is enforced by the
/// store with a unique index on `LOWER(email)`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email TEXT NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     role account_role NOT NULL,
///     age INTEGER,
///     allergies TEXT[] NOT NULL DEFAULT '{}',
///     medications TEXT[] NOT NULL DEFAULT '{}',
///     goals JSONB NOT NULL DEFAULT '[]',
///     specialty TEXT,
///     patients UUID[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
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
///         email: "jane.doe@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         role: Role::Patient,
///         age: Some(28),
///         allergies: vec!["peanuts".to_string()],
///         medications: vec![],
///         specialty: None,
///     },
/// )
/// .await?;
///
/// let found = Account::find_by_email(&pool, "jane.doe@example.com").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::goal::Goal;

/// Account role tag
///
/// Determines which specialized fields are legal to read or write.
/// Stored as the Postgres enum `account_role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
pub enum Role {
    Patient,
    Provider,
}

impl Role {
    /// Gets role as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Provider => "provider",
        }
    }
}

/// Account row, polymorphic over role
///
/// Passwords are stored as Argon2id hashes, never in plaintext. Use
/// [`ProfileView`] when returning an account to a client so the hash
/// and the other role's columns never leak.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique case-insensitively
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Role tag, immutable after creation
    pub role: Role,

    /// Patient: age in years
    pub age: Option<i32>,

    /// Patient: allergy strings
    pub allergies: Vec<String>,

    /// Patient: current medication strings
    pub medications: Vec<String>,

    /// Patient: ordered goal list (embedded JSON)
    pub goals: Json<Vec<Goal>>,

    /// Provider: optional specialty
    pub specialty: Option<String>,

    /// Provider: references to patient accounts
    pub patients: Vec<Uuid>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new account
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    /// Argon2id hash, NOT the plaintext password
    pub password_hash: String,
    pub role: Role,
    pub age: Option<i32>,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub specialty: Option<String>,
}

/// Partial profile update
///
/// Only non-None fields are written. Role and password are never
/// updatable through this path.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub allergies: Option<Vec<String>>,
    pub medications: Option<Vec<String>>,
    pub specialty: Option<String>,
}

impl UpdateProfile {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.allergies.is_none()
            && self.medications.is_none()
            && self.specialty.is_none()
    }

    /// True when the update touches a field the given role may not write
    pub fn violates_role(&self, role: Role) -> bool {
        match role {
            Role::Patient => self.specialty.is_some(),
            Role::Provider => {
                self.age.is_some() || self.allergies.is_some() || self.medications.is_some()
            }
        }
    }
}

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, role, age, allergies, \
     medications, goals, specialty, patients, created_at, updated_at";

impl Account {
    /// Creates a new account
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique index
    /// violation) or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateAccount) -> Result<Self, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (name, email, password_hash, role, age, allergies, medications, specialty)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ACCOUNT_COLUMNS}
            "#,
        ))
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(data.age)
        .bind(data.allergies)
        .bind(data.medications)
        .bind(data.specialty)
        .fetch_one(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by email, case-insensitively
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE LOWER(email) = LOWER($1)",
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Applies a partial profile update
    ///
    /// Builds the UPDATE dynamically from the non-None fields; `updated_at`
    /// is always touched. Role legality is the caller's concern, see
    /// [`UpdateProfile::violates_role`].
    ///
    /// # Returns
    ///
    /// The updated account, or None if no such account exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProfile,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let mut query = String::from("UPDATE accounts SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.email.is_some() {
            bind_count += 1;
            query.push_str(&format!(", email = ${}", bind_count));
        }
        if data.age.is_some() {
            bind_count += 1;
            query.push_str(&format!(", age = ${}", bind_count));
        }
        if data.allergies.is_some() {
            bind_count += 1;
            query.push_str(&format!(", allergies = ${}", bind_count));
        }
        if data.medications.is_some() {
            bind_count += 1;
            query.push_str(&format!(", medications = ${}", bind_count));
        }
        if data.specialty.is_some() {
            bind_count += 1;
            query.push_str(&format!(", specialty = ${}", bind_count));
        }

        query.push_str(&format!(
            " WHERE id = $1 RETURNING {ACCOUNT_COLUMNS}"
        ));

        let mut q = sqlx::query_as::<_, Account>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(age) = data.age {
            q = q.bind(age);
        }
        if let Some(allergies) = data.allergies {
            q = q.bind(allergies);
        }
        if let Some(medications) = data.medications {
            q = q.bind(medications);
        }
        if let Some(specialty) = data.specialty {
            q = q.bind(specialty);
        }

        let account = q.fetch_optional(pool).await?;

        Ok(account)
    }

    /// Persists a patient's goal list after an in-memory mutation
    ///
    /// The row filter includes the role so a provider row can never grow a
    /// goal list through this path.
    ///
    /// # Returns
    ///
    /// True if a patient row was written, false otherwise.
    pub async fn save_goals(pool: &PgPool, id: Uuid, goals: &[Goal]) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET goals = $2, updated_at = NOW()
            WHERE id = $1 AND role = 'patient'
            "#,
        )
        .bind(id)
        .bind(Json(goals))
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Loads the patient accounts referenced by a provider's patient list
    ///
    /// Unknown ids and non-patient rows are silently skipped; order follows
    /// creation date so the listing is stable.
    pub async fn find_patients(
        pool: &PgPool,
        patient_ids: &[Uuid],
    ) -> Result<Vec<Self>, sqlx::Error> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM accounts
            WHERE id = ANY($1) AND role = 'patient'
            ORDER BY created_at
            "#,
        ))
        .bind(patient_ids)
        .fetch_all(pool)
        .await?;

        Ok(accounts)
    }

    /// Adds a patient reference to a provider's list (idempotent)
    pub async fn assign_patient(
        pool: &PgPool,
        provider_id: Uuid,
        patient_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET patients = array_append(patients, $2), updated_at = NOW()
            WHERE id = $1 AND role = 'provider' AND NOT ($2 = ANY(patients))
            "#,
        )
        .bind(provider_id)
        .bind(patient_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes an account by ID
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Client-facing projection of an account
///
/// Excludes the password hash and the columns belonging to the other
/// role. This is what profile and registration endpoints return.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,

    #[serde(rename = "currentMedications", skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patients: Option<Vec<Uuid>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for ProfileView {
    fn from(account: Account) -> Self {
        let is_patient = account.role == Role::Patient;
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
            age: if is_patient { account.age } else { None },
            allergies: is_patient.then_some(account.allergies),
            medications: is_patient.then_some(account.medications),
            goals: is_patient.then_some(account.goals.0),
            specialty: if is_patient { None } else { account.specialty },
            patients: (!is_patient).then_some(account.patients),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account(role: Role) -> Account {
        Account {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            role,
            age: Some(28),
            allergies: vec!["peanuts".to_string()],
            medications: vec!["ibuprofen".to_string()],
            goals: Json(vec![]),
            specialty: Some("Cardiology".to_string()),
            patients: vec![Uuid::new_v4()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Patient.as_str(), "patient");
        assert_eq!(Role::Provider.as_str(), "provider");
    }

    #[test]
    fn test_role_deserializes_lowercase() {
        assert_eq!(
            serde_json::from_str::<Role>("\"patient\"").unwrap(),
            Role::Patient
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"provider\"").unwrap(),
            Role::Provider
        );
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
    }

    #[test]
    fn test_profile_view_hides_password() {
        let view = ProfileView::from(sample_account(Role::Patient));
        let json = serde_json::to_value(&view).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_profile_view_patient_fields() {
        let view = ProfileView::from(sample_account(Role::Patient));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["age"], 28);
        assert_eq!(json["allergies"][0], "peanuts");
        assert_eq!(json["currentMedications"][0], "ibuprofen");
        assert!(json.get("goals").is_some());

        // Provider columns must not leak into a patient profile
        assert!(json.get("specialty").is_none());
        assert!(json.get("patients").is_none());
    }

    #[test]
    fn test_profile_view_provider_fields() {
        let view = ProfileView::from(sample_account(Role::Provider));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["specialty"], "Cardiology");
        assert!(json.get("patients").is_some());

        assert!(json.get("age").is_none());
        assert!(json.get("allergies").is_none());
        assert!(json.get("currentMedications").is_none());
        assert!(json.get("goals").is_none());
    }

    #[test]
    fn test_update_profile_is_empty() {
        assert!(UpdateProfile::default().is_empty());
        assert!(!UpdateProfile {
            name: Some("x".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_update_profile_role_legality() {
        let patient_update = UpdateProfile {
            age: Some(30),
            allergies: Some(vec![]),
            ..Default::default()
        };
        assert!(!patient_update.violates_role(Role::Patient));
        assert!(patient_update.violates_role(Role::Provider));

        let provider_update = UpdateProfile {
            specialty: Some("Oncology".to_string()),
            ..Default::default()
        };
        assert!(!provider_update.violates_role(Role::Provider));
        assert!(provider_update.violates_role(Role::Patient));

        let shared_update = UpdateProfile {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        assert!(!shared_update.violates_role(Role::Patient));
        assert!(!shared_update.violates_role(Role::Provider));
    }
}
