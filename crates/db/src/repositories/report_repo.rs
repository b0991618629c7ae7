//! Read-only aggregation queries for reports, dashboards and statistics.

use canteen_core::reporting::{
    DateRange, Report, DASHBOARD_APPLICATIONS, DASHBOARD_PAYMENT_DAYS, STATISTICS_DAYS,
    TOP_DISHES_LIMIT,
};
use canteen_core::roles::ROLE_STUDENT;
use canteen_core::types::{Day, Money};
use sqlx::PgPool;

use crate::models::application::ApplicationResponse;
use crate::models::attendance::MealCount;
use crate::models::report::{DashboardStats, DishRating, Statistics};
use crate::models::status::ApplicationStatus;
use crate::repositories::{ApplicationRepo, UserRepo};

pub struct ReportRepo;

impl ReportRepo {
    /// Sum and count successful payments dated within `range`.
    pub async fn payment_totals(pool: &PgPool, range: DateRange) -> Result<(Money, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT, COUNT(*)
             FROM payments
             WHERE successful = true AND date BETWEEN $1 AND $2",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(pool)
        .await
    }

    /// Attendance count per meal type within `range`.
    pub async fn attendance_by_type(
        pool: &PgPool,
        range: DateRange,
    ) -> Result<Vec<MealCount>, sqlx::Error> {
        sqlx::query_as::<_, MealCount>(
            "SELECT meal_type, COUNT(*) AS count
             FROM attendances
             WHERE date BETWEEN $1 AND $2
             GROUP BY meal_type
             ORDER BY meal_type",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(pool)
        .await
    }

    /// Sum of approved application prices dated within `range`.
    pub async fn approved_expenses(pool: &PgPool, range: DateRange) -> Result<Money, sqlx::Error> {
        let row: (Money,) = sqlx::query_as(
            "SELECT COALESCE(SUM(price), 0)::BIGINT
             FROM applications
             WHERE status_id = $1 AND date BETWEEN $2 AND $3",
        )
        .bind(ApplicationStatus::Approved.id())
        .bind(range.start)
        .bind(range.end)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Full report over an inclusive date range.
    pub async fn summary(pool: &PgPool, range: DateRange) -> Result<Report, sqlx::Error> {
        let (payments_total, payments_count) = Self::payment_totals(pool, range).await?;
        let by_type = Self::attendance_by_type(pool, range).await?;
        let expenses = Self::approved_expenses(pool, range).await?;

        let count_of = |meal: &str| {
            by_type
                .iter()
                .find(|c| c.meal_type == meal)
                .map_or(0, |c| c.count)
        };
        let breakfasts = count_of("breakfast");
        let lunches = count_of("lunch");

        Ok(Report {
            range,
            payments_total,
            payments_count,
            attendance_total: breakfasts + lunches,
            breakfasts,
            lunches,
            expenses,
        })
    }

    /// Headline figures and the newest pending applications for the admin
    /// dashboard.
    pub async fn dashboard(pool: &PgPool, today: Day) -> Result<DashboardStats, sqlx::Error> {
        let total_students = UserRepo::count_by_role(pool, ROLE_STUDENT).await?;
        let (payments_week, _) =
            Self::payment_totals(pool, DateRange::trailing(DASHBOARD_PAYMENT_DAYS, today)).await?;
        let (attendance_today,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM attendances WHERE date = $1")
                .bind(today)
                .fetch_one(pool)
                .await?;
        let pending_applications =
            ApplicationRepo::count_by_status(pool, ApplicationStatus::Pending).await?;
        let pending = ApplicationRepo::list_by_status(
            pool,
            ApplicationStatus::Pending,
            Some(DASHBOARD_APPLICATIONS),
        )
        .await?
        .into_iter()
        .map(ApplicationResponse::from)
        .collect();

        Ok(DashboardStats {
            total_students,
            payments_week,
            attendance_today,
            pending_applications,
            pending,
        })
    }

    /// Dishes with at least one review, best average rating first.
    pub async fn top_rated_dishes(pool: &PgPool, limit: i64) -> Result<Vec<DishRating>, sqlx::Error> {
        sqlx::query_as::<_, DishRating>(
            "SELECT d.id AS dish_id, d.name,
                    AVG(r.rating)::FLOAT8 AS avg_rating,
                    COUNT(r.id) AS review_count
             FROM dishes d
             JOIN reviews r ON r.dish_id = d.id
             GROUP BY d.id, d.name
             ORDER BY avg_rating DESC, review_count DESC, d.id
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Trailing 30-day statistics.
    pub async fn statistics(pool: &PgPool, today: Day) -> Result<Statistics, sqlx::Error> {
        let range = DateRange::trailing(STATISTICS_DAYS, today);
        let (payments_total, payments_count) = Self::payment_totals(pool, range).await?;
        let attendance_by_type = Self::attendance_by_type(pool, range).await?;
        let popular_dishes = Self::top_rated_dishes(pool, TOP_DISHES_LIMIT).await?;

        Ok(Statistics {
            range,
            payments_total,
            payments_count,
            attendance_by_type,
            popular_dishes,
        })
    }
}
