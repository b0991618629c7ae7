//! Student flows: menu view, meal claims, payments, subscriptions, reviews.

mod common;

use axum::http::StatusCode;
use canteen_core::roles::ROLE_STUDENT;
use canteen_core::types::today;
use canteen_db::models::dish::CreateDish;
use canteen_db::models::menu::CreateMenu;
use canteen_db::models::product::CreateProduct;
use canteen_db::models::user::UpdateProfile;
use canteen_db::repositories::{DishRepo, MenuRepo, ProductRepo, UserRepo};
use common::{
    body_json, create_user, get_auth, post_auth, post_json_auth, put_json_auth, token_for,
};
use sqlx::PgPool;

/// Today's menu: breakfast = porridge (30, dairy) + tea (20); lunch = soup (45).
async fn publish_today(pool: &PgPool) -> (i64, i64, i64) {
    let milk = ProductRepo::create(
        pool,
        &CreateProduct {
            name: "Milk".to_string(),
            allergen_ids: vec![2],
            amount: 10,
        },
    )
    .await
    .unwrap();
    let mut ids = Vec::new();
    let dishes = [
        ("Porridge", vec![milk.id], 30),
        ("Tea", vec![], 20),
        ("Soup", vec![], 45),
    ];
    for (name, product_ids, price) in dishes {
        let dish = DishRepo::create(
            pool,
            &CreateDish {
                name: name.to_string(),
                product_ids,
                amount: 0,
                price,
            },
        )
        .await
        .unwrap();
        ids.push(dish.id);
    }
    MenuRepo::create(
        pool,
        &CreateMenu {
            date: today(),
            breakfast_dish_ids: vec![ids[0], ids[1]],
            lunch_dish_ids: vec![ids[2]],
        },
    )
    .await
    .unwrap();
    (ids[0], ids[1], ids[2])
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn menu_view_flags_allergens_and_totals(pool: PgPool) {
    let (porridge, tea, _) = publish_today(&pool).await;
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 100).await;
    UserRepo::update_profile(
        &pool,
        student.id,
        &UpdateProfile {
            name: None,
            email: None,
            birth_date: None,
            allergen_ids: Some(vec![2, 3]),
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/student/menu", &token_for(&student)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["published"], true);
    assert_eq!(data["balance"], 100);
    assert_eq!(data["breakfast"]["total_price"], 50);
    assert_eq!(data["breakfast"]["taken"], false);
    assert_eq!(data["lunch"]["total_price"], 45);

    let dishes = data["breakfast"]["dishes"].as_array().unwrap();
    assert_eq!(dishes.len(), 2);
    assert_eq!(dishes[0]["id"], porridge);
    assert_eq!(dishes[0]["has_allergen"], true);
    assert_eq!(dishes[1]["id"], tea);
    assert_eq!(dishes[1]["has_allergen"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn menu_view_without_menu_is_empty(pool: PgPool) {
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 0).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/student/menu", &token_for(&student)).await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["published"], false);
    assert_eq!(data["lunch"]["dishes"], serde_json::json!([]));
    assert!(data["subscription"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_with_insufficient_balance_is_402(pool: PgPool) {
    publish_today(&pool).await;
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 40).await;
    let app = common::build_test_app(pool.clone());

    let response = post_auth(app, "/api/v1/student/meals/breakfast", &token_for(&student)).await;

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body_json(response).await["code"], "INSUFFICIENT_BALANCE");
    let user = UserRepo::find_by_id(&pool, student.id).await.unwrap().unwrap();
    assert_eq!(user.balance, 40);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_then_reclaim(pool: PgPool) {
    publish_today(&pool).await;
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 60).await;
    let token = token_for(&student);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/student/meals/breakfast", &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let data = &body_json(response).await["data"];
    assert_eq!(data["charge"], 50);
    assert_eq!(data["balance"], 10);
    assert_eq!(data["covered_by_subscription"], false);
    assert_eq!(data["attendance"]["meal_type"], "breakfast");

    let app = common::build_test_app(pool.clone());
    let again = post_auth(app, "/api/v1/student/meals/breakfast", &token).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(again).await["code"], "ALREADY_CLAIMED");

    let app = common::build_test_app(pool);
    let view = body_json(get_auth(app, "/api/v1/student/menu", &token).await).await;
    assert_eq!(view["data"]["breakfast"]["taken"], true);
    assert_eq!(view["data"]["balance"], 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_unknown_meal_type_is_400(pool: PgPool) {
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 60).await;
    let app = common::build_test_app(pool);

    let response = post_auth(app, "/api/v1/student/meals/dinner", &token_for(&student)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_without_menu_is_404(pool: PgPool) {
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 60).await;
    let app = common::build_test_app(pool);

    let response = post_auth(app, "/api/v1/student/meals/lunch", &token_for(&student)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NO_MENU_PUBLISHED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn top_up_and_history(pool: PgPool) {
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 5).await;
    let token = token_for(&student);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "amount": 300 });
    let response = post_json_auth(app, "/api/v1/student/payments", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["balance"], 305);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "amount": 0 });
    let rejected = post_json_auth(app, "/api/v1/student/payments", &token, body).await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let history = body_json(get_auth(app, "/api/v1/student/payments", &token).await).await;
    assert_eq!(history["data"]["balance"], 305);
    assert_eq!(history["data"]["payments"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subscription_covers_claims(pool: PgPool) {
    publish_today(&pool).await;
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 1600).await;
    let token = token_for(&student);

    let app = common::build_test_app(pool.clone());
    let overview = body_json(get_auth(app, "/api/v1/student/subscription", &token).await).await;
    assert_eq!(overview["data"]["prices"].as_array().unwrap().len(), 9);
    assert!(overview["data"]["active"].is_null());

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "duration": 7, "meal_type": "both" });
    let response = post_json_auth(app, "/api/v1/student/subscription", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let receipt = &body_json(response).await["data"];
    assert_eq!(receipt["price"], 1500);
    assert_eq!(receipt["balance"], 100);

    let app = common::build_test_app(pool.clone());
    let claim = post_auth(app, "/api/v1/student/meals/lunch", &token).await;
    let claim = &body_json(claim).await["data"];
    assert_eq!(claim["covered_by_subscription"], true);
    assert_eq!(claim["charge"], 0);
    assert_eq!(claim["balance"], 100);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "duration": 30, "meal_type": "lunch" });
    let broke = post_json_auth(app, "/api/v1/student/subscription", &token, body).await;
    assert_eq!(broke.status(), StatusCode::PAYMENT_REQUIRED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subscription_rejects_unsold_duration(pool: PgPool) {
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 100_000).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "duration": 10, "meal_type": "lunch" });
    let response =
        post_json_auth(app, "/api/v1/student/subscription", &token_for(&student), body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reviews_upsert_and_list(pool: PgPool) {
    let (porridge, _, soup) = publish_today(&pool).await;
    let student = create_user(&pool, "pupil", ROLE_STUDENT, 0).await;
    let token = token_for(&student);

    for rating in [2, 4] {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "rating": rating, "comment": "ok" });
        let uri = format!("/api/v1/student/reviews/{soup}");
        let response = put_json_auth(app, &uri, &token, body).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool.clone());
    let list = body_json(get_auth(app, "/api/v1/student/reviews", &token).await).await;
    let dishes = list["data"].as_array().unwrap();
    assert_eq!(dishes.len(), 3);
    let soup_entry = dishes.iter().find(|d| d["dish_id"] == soup).unwrap();
    assert_eq!(soup_entry["review"]["rating"], 4);
    let porridge_entry = dishes.iter().find(|d| d["dish_id"] == porridge).unwrap();
    assert!(porridge_entry["review"].is_null());

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "rating": 6 });
    let uri = format!("/api/v1/student/reviews/{soup}");
    let bad = put_json_auth(app, &uri, &token, body).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "rating": 3 });
    let missing = put_json_auth(app, "/api/v1/student/reviews/9999", &token, body).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
