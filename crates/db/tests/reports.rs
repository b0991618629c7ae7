//! Integration tests for report and dashboard aggregates.

mod common;

use canteen_core::meals::MealType;
use canteen_core::procurement::ApplicationAction;
use canteen_core::reporting::DateRange;
use canteen_db::models::application::CreateApplication;
use canteen_db::models::review::UpsertReview;
use canteen_db::repositories::{
    ApplicationRepo, AttendanceRepo, PaymentRepo, ReportRepo, ReviewRepo,
};
use common::{cook, day, dish, menu, product, student};
use sqlx::PgPool;

fn review(rating: i16) -> UpsertReview {
    UpsertReview {
        rating,
        comment: String::new(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_report_is_all_zeroes(pool: PgPool) {
    let range = DateRange::resolve(None, None, day(2024, 1, 31)).unwrap();

    let report = ReportRepo::summary(&pool, range).await.unwrap();

    assert_eq!(report.payments_total, 0);
    assert_eq!(report.payments_count, 0);
    assert_eq!(report.attendance_total, 0);
    assert_eq!(report.expenses, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_summary_respects_range(pool: PgPool) {
    let pupil = student(&pool, "pupil", 0).await;
    PaymentRepo::top_up(&pool, pupil.id, 300, day(2024, 1, 5)).await.unwrap();
    PaymentRepo::top_up(&pool, pupil.id, 200, day(2024, 1, 10)).await.unwrap();
    PaymentRepo::top_up(&pool, pupil.id, 999, day(2024, 2, 1)).await.unwrap();

    let porridge = dish(&pool, "Porridge", &[], 30).await;
    let soup = dish(&pool, "Soup", &[], 40).await;
    menu(&pool, day(2024, 1, 10), &[porridge.id], &[soup.id]).await;
    AttendanceRepo::claim_meal(&pool, pupil.id, day(2024, 1, 10), MealType::Breakfast)
        .await
        .unwrap();
    AttendanceRepo::claim_meal(&pool, pupil.id, day(2024, 1, 10), MealType::Lunch)
        .await
        .unwrap();

    let chef = cook(&pool, "chef").await;
    let flour = product(&pool, "Flour", &[], 0).await;
    let input = CreateApplication {
        product_ids: vec![flour.id],
        amounts: "10".to_string(),
        price: 120,
    };
    let approved = ApplicationRepo::submit(&pool, chef.id, &input, day(2024, 1, 12))
        .await
        .unwrap();
    ApplicationRepo::submit(&pool, chef.id, &input, day(2024, 1, 12))
        .await
        .unwrap();
    ApplicationRepo::decide(&pool, approved.id, Some(ApplicationAction::Approve))
        .await
        .unwrap();

    let range = DateRange::resolve(Some(day(2024, 1, 1)), Some(day(2024, 1, 31)), day(2024, 3, 1))
        .unwrap();
    let report = ReportRepo::summary(&pool, range).await.unwrap();

    assert_eq!(report.payments_total, 500);
    assert_eq!(report.payments_count, 2);
    assert_eq!(report.breakfasts, 1);
    assert_eq!(report.lunches, 1);
    assert_eq!(report.attendance_total, 2);
    assert_eq!(report.expenses, 120);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_figures(pool: PgPool) {
    let today = day(2024, 1, 10);
    let pupil = student(&pool, "pupil", 0).await;
    student(&pool, "other", 0).await;
    let chef = cook(&pool, "chef").await;

    PaymentRepo::top_up(&pool, pupil.id, 100, day(2024, 1, 8)).await.unwrap();
    PaymentRepo::top_up(&pool, pupil.id, 100, day(2023, 12, 1)).await.unwrap();

    let tea = dish(&pool, "Tea", &[], 10).await;
    menu(&pool, today, &[tea.id], &[]).await;
    AttendanceRepo::claim_meal(&pool, pupil.id, today, MealType::Breakfast)
        .await
        .unwrap();

    let flour = product(&pool, "Flour", &[], 0).await;
    let input = CreateApplication {
        product_ids: vec![flour.id],
        amounts: "1".to_string(),
        price: 5,
    };
    let pending = ApplicationRepo::submit(&pool, chef.id, &input, today).await.unwrap();
    let decided = ApplicationRepo::submit(&pool, chef.id, &input, today).await.unwrap();
    ApplicationRepo::decide(&pool, decided.id, Some(ApplicationAction::Reject))
        .await
        .unwrap();

    let stats = ReportRepo::dashboard(&pool, today).await.unwrap();

    assert_eq!(stats.total_students, 2);
    assert_eq!(stats.payments_week, 100);
    assert_eq!(stats.attendance_today, 1);
    assert_eq!(stats.pending_applications, 1);
    assert_eq!(stats.pending.len(), 1);
    assert_eq!(stats.pending[0].id, pending.id);
    assert_eq!(stats.pending[0].status, "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_lists_five_newest_pending(pool: PgPool) {
    let chef = cook(&pool, "chef").await;
    let flour = product(&pool, "Flour", &[], 0).await;
    let input = CreateApplication {
        product_ids: vec![flour.id],
        amounts: "1".to_string(),
        price: 5,
    };
    let mut ids = Vec::new();
    for offset in 0..7 {
        let app = ApplicationRepo::submit(&pool, chef.id, &input, day(2024, 1, 1 + offset))
            .await
            .unwrap();
        ids.push(app.id);
    }

    let stats = ReportRepo::dashboard(&pool, day(2024, 1, 10)).await.unwrap();

    assert_eq!(stats.pending_applications, 7);
    let listed: Vec<i64> = stats.pending.iter().map(|a| a.id).collect();
    let newest: Vec<i64> = ids.iter().rev().take(5).copied().collect();
    assert_eq!(listed, newest);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_rated_dishes(pool: PgPool) {
    let a = student(&pool, "a", 0).await;
    let b = student(&pool, "b", 0).await;
    let soup = dish(&pool, "Soup", &[], 40).await;
    let stew = dish(&pool, "Stew", &[], 40).await;
    dish(&pool, "Unrated", &[], 40).await;

    ReviewRepo::upsert(&pool, a.id, soup.id, &review(3)).await.unwrap();
    ReviewRepo::upsert(&pool, b.id, soup.id, &review(4)).await.unwrap();
    ReviewRepo::upsert(&pool, a.id, stew.id, &review(5)).await.unwrap();

    let top = ReportRepo::top_rated_dishes(&pool, 5).await.unwrap();

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "Stew");
    assert_eq!(top[1].name, "Soup");
    assert!((top[1].avg_rating - 3.5).abs() < f64::EPSILON);
    assert_eq!(top[1].review_count, 2);
}
