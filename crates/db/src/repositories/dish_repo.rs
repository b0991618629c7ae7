//! Repository for the `dishes` table, plus the catalog lookups that resolve
//! dish and product id lists.

use std::collections::{BTreeSet, HashMap};

use canteen_core::catalog::{join_ids, union_allergens};
use canteen_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::dish::{CreateDish, Dish, DishResponse, UpdateDish};
use crate::repositories::ProductRepo;

const COLUMNS: &str = "id, name, products, amount, price, created_at, updated_at";

/// Provides CRUD operations for dishes.
pub struct DishRepo;

impl DishRepo {
    /// Insert a new dish, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDish) -> Result<Dish, sqlx::Error> {
        let query = format!(
            "INSERT INTO dishes (name, products, amount, price)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(&input.name)
            .bind(join_ids(&input.product_ids))
            .bind(input.amount)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes WHERE id = $1");
        sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a dish by exact name (used by the demo seeder).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes WHERE name = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Dish>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all dishes by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes ORDER BY name, id");
        sqlx::query_as::<_, Dish>(&query).fetch_all(pool).await
    }

    /// Update a dish. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDish,
    ) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!(
            "UPDATE dishes SET
                name = COALESCE($2, name),
                products = COALESCE($3, products),
                amount = COALESCE($4, amount),
                price = COALESCE($5, price)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.product_ids.as_deref().map(join_ids))
            .bind(input.amount)
            .bind(input.price)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a dish id list, keeping list order and dropping ids that do
    /// not exist. A dish listed twice is returned once.
    pub async fn resolve<'e, E>(executor: E, ids: &[DbId]) -> Result<Vec<Dish>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM dishes WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, Dish>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await?;

        let mut by_id: HashMap<DbId, Dish> = rows.into_iter().map(|d| (d.id, d)).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Union of allergen ids over the dish's resolvable products.
    pub async fn allergens_of(pool: &PgPool, dish: &Dish) -> Result<BTreeSet<DbId>, sqlx::Error> {
        let products = ProductRepo::find_by_ids(pool, &dish.product_ids()).await?;
        Ok(union_allergens(products.iter().map(|p| p.allergens.as_str())))
    }

    /// Attach resolved allergen sets to a batch of dishes with a single
    /// product query.
    pub async fn with_allergens(
        pool: &PgPool,
        dishes: Vec<Dish>,
    ) -> Result<Vec<DishResponse>, sqlx::Error> {
        let product_ids: Vec<DbId> = dishes
            .iter()
            .flat_map(Dish::product_ids)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let products = ProductRepo::find_by_ids(pool, &product_ids).await?;
        let allergens_by_product: HashMap<DbId, &str> = products
            .iter()
            .map(|p| (p.id, p.allergens.as_str()))
            .collect();

        Ok(dishes
            .into_iter()
            .map(|dish| {
                let allergens = union_allergens(
                    dish.product_ids()
                        .iter()
                        .filter_map(|id| allergens_by_product.get(id).copied()),
                );
                DishResponse::new(dish, allergens)
            })
            .collect())
    }
}
