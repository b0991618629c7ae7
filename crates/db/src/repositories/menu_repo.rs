//! Repository for the `menus` table.

use canteen_core::catalog::join_ids;
use canteen_core::meals::MealType;
use canteen_core::types::{Day, DbId};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::dish::Dish;
use crate::models::menu::{CreateMenu, Menu, UpdateMenu};
use crate::repositories::DishRepo;

const COLUMNS: &str = "id, date, breakfast, lunch, given_breakfasts_amount, \
                       given_lunches_amount, created_at, updated_at";

/// Provides CRUD operations for daily menus.
pub struct MenuRepo;

impl MenuRepo {
    /// Publish a menu. Fails with a `uq_menus_date` violation if the date
    /// already has one.
    pub async fn create(pool: &PgPool, input: &CreateMenu) -> Result<Menu, sqlx::Error> {
        let query = format!(
            "INSERT INTO menus (date, breakfast, lunch)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Menu>(&query)
            .bind(input.date)
            .bind(join_ids(&input.breakfast_dish_ids))
            .bind(join_ids(&input.lunch_dish_ids))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Menu>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menus WHERE id = $1");
        sqlx::query_as::<_, Menu>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The menu published for `date`, if any.
    pub async fn find_by_date<'e, E>(executor: E, date: Day) -> Result<Option<Menu>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM menus WHERE date = $1");
        sqlx::query_as::<_, Menu>(&query)
            .bind(date)
            .fetch_optional(executor)
            .await
    }

    /// Most recent menus first, at most `limit`.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Menu>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menus ORDER BY date DESC LIMIT $1");
        sqlx::query_as::<_, Menu>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a menu. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMenu,
    ) -> Result<Option<Menu>, sqlx::Error> {
        let query = format!(
            "UPDATE menus SET
                date = COALESCE($2, date),
                breakfast = COALESCE($3, breakfast),
                lunch = COALESCE($4, lunch)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Menu>(&query)
            .bind(id)
            .bind(input.date)
            .bind(input.breakfast_dish_ids.as_deref().map(join_ids))
            .bind(input.lunch_dish_ids.as_deref().map(join_ids))
            .fetch_optional(pool)
            .await
    }

    /// Dishes served in a meal slot, in menu order; dangling ids are omitted.
    pub async fn dishes_for(
        pool: &PgPool,
        menu: &Menu,
        meal: MealType,
    ) -> Result<Vec<Dish>, sqlx::Error> {
        DishRepo::resolve(pool, &menu.dish_ids(meal)).await
    }

    /// Bump the per-slot handed-out counter.
    pub(crate) async fn increment_given(
        conn: &mut PgConnection,
        id: DbId,
        meal: MealType,
    ) -> Result<(), sqlx::Error> {
        let query = match meal {
            MealType::Breakfast => {
                "UPDATE menus SET given_breakfasts_amount = given_breakfasts_amount + 1 WHERE id = $1"
            }
            MealType::Lunch => {
                "UPDATE menus SET given_lunches_amount = given_lunches_amount + 1 WHERE id = $1"
            }
        };
        sqlx::query(query).bind(id).execute(conn).await?;
        Ok(())
    }
}
