//! Daily menu entity model and DTOs.

use canteen_core::catalog::resolve_ids;
use canteen_core::meals::MealType;
use canteen_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `menus` table. One menu per calendar date.
#[derive(Debug, Clone, FromRow)]
pub struct Menu {
    pub id: DbId,
    pub date: Day,
    /// Comma-joined dish ids served at breakfast.
    pub breakfast: String,
    /// Comma-joined dish ids served at lunch.
    pub lunch: String,
    pub given_breakfasts_amount: i32,
    pub given_lunches_amount: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Menu {
    /// Dish ids listed for a meal slot, in menu order.
    pub fn dish_ids(&self, meal: MealType) -> Vec<DbId> {
        match meal {
            MealType::Breakfast => resolve_ids(&self.breakfast),
            MealType::Lunch => resolve_ids(&self.lunch),
        }
    }
}

/// API representation with the dish lists decoded.
#[derive(Debug, Clone, Serialize)]
pub struct MenuResponse {
    pub id: DbId,
    pub date: Day,
    pub breakfast_dish_ids: Vec<DbId>,
    pub lunch_dish_ids: Vec<DbId>,
    pub given_breakfasts_amount: i32,
    pub given_lunches_amount: i32,
}

impl From<Menu> for MenuResponse {
    fn from(menu: Menu) -> Self {
        Self {
            breakfast_dish_ids: menu.dish_ids(MealType::Breakfast),
            lunch_dish_ids: menu.dish_ids(MealType::Lunch),
            id: menu.id,
            date: menu.date,
            given_breakfasts_amount: menu.given_breakfasts_amount,
            given_lunches_amount: menu.given_lunches_amount,
        }
    }
}

/// DTO for publishing a menu.
#[derive(Debug, Deserialize)]
pub struct CreateMenu {
    pub date: Day,
    #[serde(default)]
    pub breakfast_dish_ids: Vec<DbId>,
    #[serde(default)]
    pub lunch_dish_ids: Vec<DbId>,
}

/// DTO for editing a menu. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateMenu {
    pub date: Option<Day>,
    pub breakfast_dish_ids: Option<Vec<DbId>>,
    pub lunch_dish_ids: Option<Vec<DbId>>,
}
