//! Repository for the `allergens` table.

use sqlx::PgPool;

use crate::models::allergen::{Allergen, CreateAllergen};

const COLUMNS: &str = "id, name, created_at";

pub struct AllergenRepo;

impl AllergenRepo {
    /// Insert a new allergen, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAllergen) -> Result<Allergen, sqlx::Error> {
        let query = format!("INSERT INTO allergens (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Allergen>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Return the allergen with `name`, creating it if missing.
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Allergen, sqlx::Error> {
        let query = format!(
            "INSERT INTO allergens (name) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_allergens_name DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Allergen>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// List all allergens by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Allergen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM allergens ORDER BY id");
        sqlx::query_as::<_, Allergen>(&query).fetch_all(pool).await
    }
}
