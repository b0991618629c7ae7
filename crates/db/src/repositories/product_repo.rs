//! Repository for the `products` table.

use canteen_core::catalog::join_ids;
use canteen_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::product::{CreateProduct, Product, UpdateProduct};

const COLUMNS: &str = "id, name, allergens, amount, created_at, updated_at";

/// Provides CRUD operations for stock products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, allergens, amount)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(join_ids(&input.allergen_ids))
            .bind(input.amount)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by exact name (used by the demo seeder).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE name = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Product>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every product whose id is in `ids`. Missing ids are skipped.
    pub async fn find_by_ids<'e, E>(executor: E, ids: &[DbId]) -> Result<Vec<Product>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Product>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// List all products by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY name, id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Products whose stock is below `threshold`.
    pub async fn list_low_stock(pool: &PgPool, threshold: i32) -> Result<Vec<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE amount < $1 ORDER BY amount, name");
        sqlx::query_as::<_, Product>(&query)
            .bind(threshold)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                allergens = COALESCE($3, allergens),
                amount = COALESCE($4, amount)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.allergen_ids.as_deref().map(join_ids))
            .bind(input.amount)
            .fetch_optional(pool)
            .await
    }

    /// Add `amount` to a product's stock. Returns `false` when the product
    /// no longer exists.
    pub(crate) async fn credit_stock(
        conn: &mut PgConnection,
        id: DbId,
        amount: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE products SET amount = amount + $2 WHERE id = $1")
            .bind(id)
            .bind(amount)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
