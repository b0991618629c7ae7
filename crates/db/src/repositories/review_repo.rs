//! Repository for the `reviews` table.

use canteen_core::error::CoreError;
use canteen_core::types::DbId;
use canteen_core::validation::validate_rating;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::review::{Review, UpsertReview};

const COLUMNS: &str = "id, user_id, dish_id, rating, comment, created_at, updated_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Create the user's review of a dish, or overwrite the existing one.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        dish_id: DbId,
        input: &UpsertReview,
    ) -> Result<Review, DbError> {
        validate_rating(input.rating).map_err(CoreError::Validation)?;

        let query = format!(
            "INSERT INTO reviews (user_id, dish_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_reviews_user_dish
             DO UPDATE SET rating = EXCLUDED.rating, comment = EXCLUDED.comment
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(dish_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await?;
        Ok(review)
    }

    /// All reviews written by a user.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE user_id = $1 ORDER BY dish_id");
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
