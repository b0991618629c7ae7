//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use canteen_core::roles::{ROLE_COOK, ROLE_STUDENT};
use canteen_core::types::{Day, DbId, Money};
use canteen_db::models::dish::{CreateDish, Dish};
use canteen_db::models::menu::{CreateMenu, Menu};
use canteen_db::models::product::{CreateProduct, Product};
use canteen_db::models::user::{CreateUser, User};
use canteen_db::repositories::{DishRepo, MenuRepo, ProductRepo, UserRepo};
use chrono::NaiveDate;
use sqlx::PgPool;

pub fn day(y: i32, m: u32, d: u32) -> Day {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn student(pool: &PgPool, login: &str, balance: Money) -> User {
    user_with_role(pool, login, ROLE_STUDENT, balance).await
}

pub async fn cook(pool: &PgPool, login: &str) -> User {
    user_with_role(pool, login, ROLE_COOK, 0).await
}

async fn user_with_role(pool: &PgPool, login: &str, role: &str, balance: Money) -> User {
    let input = CreateUser {
        login: login.to_string(),
        name: format!("{login} name"),
        email: format!("{login}@school.test"),
        birth_date: None,
        password_hash: "not-a-real-hash".to_string(),
        role: role.to_string(),
        balance,
        allergen_ids: Vec::new(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

pub async fn product(pool: &PgPool, name: &str, allergen_ids: &[DbId], amount: i32) -> Product {
    let input = CreateProduct {
        name: name.to_string(),
        allergen_ids: allergen_ids.to_vec(),
        amount,
    };
    ProductRepo::create(pool, &input).await.unwrap()
}

pub async fn dish(pool: &PgPool, name: &str, product_ids: &[DbId], price: Money) -> Dish {
    let input = CreateDish {
        name: name.to_string(),
        product_ids: product_ids.to_vec(),
        amount: 0,
        price,
    };
    DishRepo::create(pool, &input).await.unwrap()
}

pub async fn menu(pool: &PgPool, date: Day, breakfast: &[DbId], lunch: &[DbId]) -> Menu {
    let input = CreateMenu {
        date,
        breakfast_dish_ids: breakfast.to_vec(),
        lunch_dish_ids: lunch.to_vec(),
    };
    MenuRepo::create(pool, &input).await.unwrap()
}

pub async fn balance_of(pool: &PgPool, user_id: DbId) -> Money {
    UserRepo::find_by_id(pool, user_id)
        .await
        .unwrap()
        .unwrap()
        .balance
}
