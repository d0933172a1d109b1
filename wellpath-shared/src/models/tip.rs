/// Wellness tip model
///
/// Tips are standalone rows with no owner. The read path picks one
/// uniformly at random, the SQL equivalent of a `$sample` aggregation.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A wellness tip shown to patients
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tip {
    /// Unique tip ID
    pub id: Uuid,

    /// Short headline
    pub title: String,

    /// Tip body
    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new tip
#[derive(Debug, Clone)]
pub struct CreateTip {
    pub title: String,
    pub description: String,
}

impl Tip {
    /// Creates a new tip
    pub async fn create(pool: &PgPool, data: CreateTip) -> Result<Self, sqlx::Error> {
        let tip = sqlx::query_as::<_, Tip>(
            r#"
            INSERT INTO tips (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(tip)
    }

    /// Selects one tip uniformly at random
    ///
    /// Returns None when the table is empty.
    pub async fn random(pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        let tip = sqlx::query_as::<_, Tip>(
            r#"
            SELECT id, title, description, created_at, updated_at
            FROM tips
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .fetch_optional(pool)
        .await?;

        Ok(tip)
    }

    /// Counts stored tips
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tips")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_serializes_without_snake_case_timestamps() {
        let tip = Tip {
            id: Uuid::new_v4(),
            title: "Hydrate".to_string(),
            description: "Drink water through the day".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&tip).unwrap();
        assert_eq!(json["title"], "Hydrate");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
