//! Admin flows: procurement decisions, reports, users and allergens.

mod common;

use axum::http::StatusCode;
use canteen_core::procurement::ApplicationAction;
use canteen_core::roles::{ROLE_ADMIN, ROLE_COOK, ROLE_STUDENT};
use canteen_core::types::today;
use canteen_db::models::application::{Application, CreateApplication};
use canteen_db::models::product::CreateProduct;
use canteen_db::repositories::{ApplicationRepo, ProductRepo};
use common::{body_json, create_user, get_auth, post_auth, post_json_auth, token_for};
use serde_json::json;
use sqlx::PgPool;

async fn pending_application(pool: &PgPool, product_id: i64) -> Application {
    let cook = create_user(pool, "chef", ROLE_COOK, 0).await;
    let input = CreateApplication {
        product_ids: vec![product_id],
        amounts: "25".to_string(),
        price: 400,
    };
    ApplicationRepo::submit(pool, cook.id, &input, today())
        .await
        .unwrap()
}

async fn product(pool: &PgPool, name: &str, amount: i32) -> i64 {
    let input = CreateProduct {
        name: name.to_string(),
        allergen_ids: Vec::new(),
        amount,
    };
    ProductRepo::create(pool, &input).await.unwrap().id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approve_credits_stock_once(pool: PgPool) {
    let potatoes = product(&pool, "Potatoes", 5).await;
    let application = pending_application(&pool, potatoes).await;
    let admin = create_user(&pool, "head", ROLE_ADMIN, 0).await;
    let uri = format!("/api/v1/admin/applications/{}/approve", application.id);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &uri, &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["status"], "approved");
    assert!(!data["decided_at"].is_null());

    let stock = ProductRepo::find_by_id(&pool, potatoes).await.unwrap().unwrap();
    assert_eq!(stock.amount, 30);

    let app = common::build_test_app(pool.clone());
    let again = post_auth(app, &uri, &token_for(&admin)).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let stock = ProductRepo::find_by_id(&pool, potatoes).await.unwrap().unwrap();
    assert_eq!(stock.amount, 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_and_unknown_action(pool: PgPool) {
    let potatoes = product(&pool, "Potatoes", 5).await;
    let application = pending_application(&pool, potatoes).await;
    let admin = create_user(&pool, "head", ROLE_ADMIN, 0).await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/admin/applications/{}/archive", application.id);
    let ignored = post_auth(app, &uri, &token).await;
    assert_eq!(ignored.status(), StatusCode::OK);
    assert_eq!(body_json(ignored).await["data"]["status"], "pending");

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/admin/applications/{}/reject", application.id);
    let rejected = post_auth(app, &uri, &token).await;
    assert_eq!(body_json(rejected).await["data"]["status"], "rejected");

    let stock = ProductRepo::find_by_id(&pool, potatoes).await.unwrap().unwrap();
    assert_eq!(stock.amount, 5);

    let app = common::build_test_app(pool);
    let missing = post_auth(app, "/api/v1/admin/applications/777/approve", &token).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_lists_pending_applications(pool: PgPool) {
    let potatoes = product(&pool, "Potatoes", 5).await;
    let waiting = pending_application(&pool, potatoes).await;
    create_user(&pool, "pupil", ROLE_STUDENT, 0).await;
    let admin = create_user(&pool, "head", ROLE_ADMIN, 0).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/dashboard", &token_for(&admin)).await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["total_students"], 1);
    assert_eq!(data["pending_applications"], 1);
    assert_eq!(data["attendance_today"], 0);
    let pending = data["pending"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], waiting.id);
    assert_eq!(pending[0]["items"][0]["amount"], 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn applications_filter_by_status(pool: PgPool) {
    let potatoes = product(&pool, "Potatoes", 5).await;
    let first = pending_application(&pool, potatoes).await;
    let cook = create_user(&pool, "sous", ROLE_COOK, 0).await;
    let input = CreateApplication {
        product_ids: vec![potatoes],
        amounts: "3".to_string(),
        price: 60,
    };
    let second = ApplicationRepo::submit(&pool, cook.id, &input, today())
        .await
        .unwrap();
    ApplicationRepo::decide(&pool, first.id, Some(ApplicationAction::Approve))
        .await
        .unwrap();
    let admin = create_user(&pool, "head", ROLE_ADMIN, 0).await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone());
    let all = body_json(get_auth(app, "/api/v1/admin/applications", &token).await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let pending = get_auth(app, "/api/v1/admin/applications?status=pending", &token).await;
    let pending = body_json(pending).await;
    let pending = pending["data"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], second.id);

    let app = common::build_test_app(pool);
    let unknown = get_auth(app, "/api/v1/admin/applications?status=lost", &token).await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_ranges(pool: PgPool) {
    let admin = create_user(&pool, "head", ROLE_ADMIN, 0).await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/reports", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["range"]["end"], today().to_string());
    assert_eq!(data["payments_total"], 0);
    assert_eq!(data["expenses"], 0);

    let app = common::build_test_app(pool);
    let inverted = get_auth(
        app,
        "/api/v1/admin/reports?start_date=2024-05-10&end_date=2024-05-01",
        &token,
    )
    .await;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn users_are_ordered_by_role_then_name(pool: PgPool) {
    create_user(&pool, "zoe", ROLE_STUDENT, 0).await;
    create_user(&pool, "adam", ROLE_STUDENT, 0).await;
    create_user(&pool, "chef", ROLE_COOK, 0).await;
    let admin = create_user(&pool, "head", ROLE_ADMIN, 0).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users", &token_for(&admin)).await;

    let logins: Vec<String> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["login"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(logins, ["head", "chef", "adam", "zoe"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn allergen_names_are_unique(pool: PgPool) {
    let admin = create_user(&pool, "head", ROLE_ADMIN, 0).await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone());
    let created =
        post_json_auth(app, "/api/v1/admin/allergens", &token, json!({ "name": "Sesame" })).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let duplicate =
        post_json_auth(app, "/api/v1/admin/allergens", &token, json!({ "name": "Sesame" })).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool);
    let list = body_json(get_auth(app, "/api/v1/admin/allergens", &token).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}
