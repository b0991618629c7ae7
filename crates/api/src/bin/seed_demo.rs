//! Populate a database with demo catalog data, today's menu and one account
//! per role.
//!
//! Idempotent: rows that already exist (matched by name, date or login) are
//! left alone. Reads `DATABASE_URL` and applies pending migrations first.

use std::collections::HashMap;

use anyhow::{anyhow, Context};
use canteen_api::auth::password::hash_password;
use canteen_core::roles::{ROLE_ADMIN, ROLE_COOK, ROLE_STUDENT};
use canteen_core::types::{today, DbId, Money};
use canteen_db::models::dish::CreateDish;
use canteen_db::models::menu::CreateMenu;
use canteen_db::models::product::CreateProduct;
use canteen_db::models::user::CreateUser;
use canteen_db::repositories::{AllergenRepo, DishRepo, MenuRepo, ProductRepo, UserRepo};
use canteen_db::DbPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ALLERGENS: [&str; 6] = ["Gluten", "Dairy", "Nuts", "Eggs", "Fish", "Soy"];

/// (name, allergens, stock)
const PRODUCTS: [(&str, &[&str], i32); 10] = [
    ("Milk", &["Dairy"], 50),
    ("Flour", &["Gluten"], 30),
    ("Eggs", &["Eggs"], 100),
    ("Butter", &["Dairy"], 20),
    ("Chicken", &[], 25),
    ("Rice", &[], 40),
    ("Vegetables", &[], 60),
    ("Bread", &["Gluten"], 50),
    ("Cheese", &["Dairy"], 15),
    ("Pasta", &["Gluten"], 35),
];

/// (name, products, portions, price)
const DISHES: [(&str, &[&str], i32, Money); 8] = [
    ("Oat porridge", &["Milk", "Flour", "Butter"], 30, 50),
    ("Omelette", &["Eggs", "Butter"], 20, 60),
    ("Cheese sandwich", &["Bread", "Cheese"], 15, 40),
    ("Chicken soup", &["Chicken", "Vegetables"], 25, 80),
    ("Chicken with rice", &["Chicken", "Rice"], 20, 90),
    ("Macaroni and cheese", &["Cheese", "Pasta"], 18, 70),
    ("Vegetable salad", &["Vegetables"], 22, 50),
    ("Fruit compote", &[], 50, 30),
];

const BREAKFAST: [&str; 4] = ["Oat porridge", "Omelette", "Cheese sandwich", "Fruit compote"];
const LUNCH: [&str; 4] = ["Chicken soup", "Chicken with rice", "Vegetable salad", "Fruit compote"];

struct DemoAccount {
    login: &'static str,
    password: &'static str,
    name: &'static str,
    role: &'static str,
    balance: Money,
    allergens: &'static [&'static str],
}

const ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount {
        login: "admin",
        password: "admin123",
        name: "School Administrator",
        role: ROLE_ADMIN,
        balance: 0,
        allergens: &[],
    },
    DemoAccount {
        login: "cook",
        password: "cook123",
        name: "Maria Ivanova",
        role: ROLE_COOK,
        balance: 0,
        allergens: &[],
    },
    DemoAccount {
        login: "student",
        password: "student123",
        name: "Ivan Petrov",
        role: ROLE_STUDENT,
        balance: 500,
        allergens: &["Dairy", "Nuts"],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_demo=info,canteen_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = canteen_db::create_pool(&database_url)
        .await
        .context("connecting to the database")?;
    canteen_db::run_migrations(&pool)
        .await
        .context("applying migrations")?;

    let allergens = seed_allergens(&pool).await?;
    let products = seed_products(&pool, &allergens).await?;
    let dishes = seed_dishes(&pool, &products).await?;
    seed_menu(&pool, &dishes).await?;
    seed_accounts(&pool, &allergens).await?;

    tracing::info!("Demo data ready. Accounts: admin/admin123, cook/cook123, student/student123");
    Ok(())
}

type NameIndex = HashMap<&'static str, DbId>;

fn lookup(index: &NameIndex, names: &[&str]) -> anyhow::Result<Vec<DbId>> {
    names
        .iter()
        .map(|n| {
            index
                .get(*n)
                .copied()
                .ok_or_else(|| anyhow!("demo data refers to unknown entry '{n}'"))
        })
        .collect()
}

async fn seed_allergens(pool: &DbPool) -> anyhow::Result<NameIndex> {
    let mut index = NameIndex::new();
    for name in ALLERGENS {
        let allergen = AllergenRepo::find_or_create(pool, name).await?;
        index.insert(name, allergen.id);
    }
    Ok(index)
}

async fn seed_products(pool: &DbPool, allergens: &NameIndex) -> anyhow::Result<NameIndex> {
    let mut index = NameIndex::new();
    for (name, allergen_names, amount) in PRODUCTS {
        let product = match ProductRepo::find_by_name(pool, name).await? {
            Some(existing) => existing,
            None => {
                let input = CreateProduct {
                    name: name.to_string(),
                    allergen_ids: lookup(allergens, allergen_names)?,
                    amount,
                };
                ProductRepo::create(pool, &input).await?
            }
        };
        index.insert(name, product.id);
    }
    tracing::info!(count = index.len(), "Products seeded");
    Ok(index)
}

async fn seed_dishes(pool: &DbPool, products: &NameIndex) -> anyhow::Result<NameIndex> {
    let mut index = NameIndex::new();
    for (name, product_names, amount, price) in DISHES {
        let dish = match DishRepo::find_by_name(pool, name).await? {
            Some(existing) => existing,
            None => {
                let input = CreateDish {
                    name: name.to_string(),
                    product_ids: lookup(products, product_names)?,
                    amount,
                    price,
                };
                DishRepo::create(pool, &input).await?
            }
        };
        index.insert(name, dish.id);
    }
    tracing::info!(count = index.len(), "Dishes seeded");
    Ok(index)
}

async fn seed_menu(pool: &DbPool, dishes: &NameIndex) -> anyhow::Result<()> {
    let date = today();
    if MenuRepo::find_by_date(pool, date).await?.is_some() {
        tracing::info!(%date, "Menu already published, leaving it alone");
        return Ok(());
    }
    let input = CreateMenu {
        date,
        breakfast_dish_ids: lookup(dishes, &BREAKFAST)?,
        lunch_dish_ids: lookup(dishes, &LUNCH)?,
    };
    MenuRepo::create(pool, &input).await?;
    tracing::info!(%date, "Menu published");
    Ok(())
}

async fn seed_accounts(pool: &DbPool, allergens: &NameIndex) -> anyhow::Result<()> {
    for account in &ACCOUNTS {
        if UserRepo::find_by_login(pool, account.login).await?.is_some() {
            continue;
        }
        let password_hash =
            hash_password(account.password).map_err(|e| anyhow!("hashing password: {e}"))?;
        let input = CreateUser {
            login: account.login.to_string(),
            name: account.name.to_string(),
            email: format!("{}@school.example", account.login),
            birth_date: None,
            password_hash,
            role: account.role.to_string(),
            balance: account.balance,
            allergen_ids: lookup(allergens, account.allergens)?,
        };
        let user = UserRepo::create(pool, &input).await?;
        tracing::info!(
            user_id = user.id,
            login = account.login,
            role = account.role,
            "Account created"
        );
    }
    Ok(())
}
