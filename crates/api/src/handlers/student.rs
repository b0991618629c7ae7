//! Handlers for the `/student` resource.
//!
//! All handlers require the `student` role via [`RequireStudent`]. Every
//! date-sensitive operation uses the server's current UTC date.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use canteen_core::catalog::has_allergen_conflict;
use canteen_core::error::CoreError;
use canteen_core::meals::MealType;
use canteen_core::pricing::{price_table, PriceEntry};
use canteen_core::types::{today, Day, DbId, Money};
use canteen_core::validation::PAYMENT_HISTORY_LIMIT;
use canteen_db::models::attendance::MealClaim;
use canteen_db::models::dish::DishResponse;
use canteen_db::models::menu::Menu;
use canteen_db::models::payment::{Payment, TopUp, TopUpReceipt};
use canteen_db::models::review::{Review, UpsertReview};
use canteen_db::models::subscription::{Subscribe, Subscription, SubscriptionReceipt};
use canteen_db::models::user::User;
use canteen_db::repositories::{
    AttendanceRepo, DishRepo, MenuRepo, PaymentRepo, ReviewRepo, SubscriptionRepo, UserRepo,
};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStudent;
use crate::query::DateParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A dish as shown to a particular student.
#[derive(Debug, Serialize)]
pub struct MenuDish {
    #[serde(flatten)]
    pub dish: DishResponse,
    /// The dish contains at least one of the student's allergens.
    pub has_allergen: bool,
}

/// One meal slot of the day's menu.
#[derive(Debug, Serialize)]
pub struct MealSlot {
    pub meal_type: MealType,
    pub dishes: Vec<MenuDish>,
    pub total_price: Money,
    /// The student already claimed this meal today.
    pub taken: bool,
}

/// The student's view of a day.
#[derive(Debug, Serialize)]
pub struct StudentMenu {
    pub date: Day,
    pub published: bool,
    pub breakfast: MealSlot,
    pub lunch: MealSlot,
    pub subscription: Option<Subscription>,
    pub balance: Money,
}

#[derive(Debug, Serialize)]
pub struct PaymentHistory {
    pub balance: Money,
    pub payments: Vec<Payment>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionOverview {
    pub active: Option<Subscription>,
    pub prices: Vec<PriceEntry>,
    pub balance: Money,
}

/// A dish with the caller's own review, if any.
#[derive(Debug, Serialize)]
pub struct ReviewableDish {
    pub dish_id: DbId,
    pub name: String,
    pub review: Option<Review>,
}

// ---------------------------------------------------------------------------
// Menu and claims
// ---------------------------------------------------------------------------

/// GET /api/v1/student/menu?date=
///
/// Defaults to today. An unpublished day yields empty slots with
/// `published = false`.
pub async fn menu(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Query(params): Query<DateParams>,
) -> AppResult<Json<DataResponse<StudentMenu>>> {
    let date = params.date.unwrap_or_else(today);
    let user = load_user(&state, auth.user_id).await?;
    let menu = MenuRepo::find_by_date(&state.pool, date).await?;

    let breakfast = meal_slot(&state, &user, menu.as_ref(), date, MealType::Breakfast).await?;
    let lunch = meal_slot(&state, &user, menu.as_ref(), date, MealType::Lunch).await?;

    let subscription = SubscriptionRepo::find_active(&state.pool, user.id, date).await?;

    Ok(Json(DataResponse {
        data: StudentMenu {
            date,
            published: menu.is_some(),
            breakfast,
            lunch,
            subscription,
            balance: user.balance,
        },
    }))
}

/// POST /api/v1/student/meals/{meal_type}
///
/// Claim today's breakfast or lunch.
pub async fn claim_meal(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(meal_type): Path<String>,
) -> AppResult<(StatusCode, Json<DataResponse<MealClaim>>)> {
    let meal: MealType = meal_type
        .parse()
        .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?;

    let claim = AttendanceRepo::claim_meal(&state.pool, auth.user_id, today(), meal).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: claim })))
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// GET /api/v1/student/payments
pub async fn list_payments(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
) -> AppResult<Json<DataResponse<PaymentHistory>>> {
    let user = load_user(&state, auth.user_id).await?;
    let payments =
        PaymentRepo::list_recent_for_user(&state.pool, user.id, PAYMENT_HISTORY_LIMIT).await?;
    Ok(Json(DataResponse {
        data: PaymentHistory {
            balance: user.balance,
            payments,
        },
    }))
}

/// POST /api/v1/student/payments
pub async fn top_up(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Json(input): Json<TopUp>,
) -> AppResult<(StatusCode, Json<DataResponse<TopUpReceipt>>)> {
    input.validate()?;
    let receipt = PaymentRepo::top_up(&state.pool, auth.user_id, input.amount, today()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// GET /api/v1/student/subscription
pub async fn subscription(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
) -> AppResult<Json<DataResponse<SubscriptionOverview>>> {
    let user = load_user(&state, auth.user_id).await?;
    let active = SubscriptionRepo::find_active(&state.pool, user.id, today()).await?;
    Ok(Json(DataResponse {
        data: SubscriptionOverview {
            active,
            prices: price_table(),
            balance: user.balance,
        },
    }))
}

/// POST /api/v1/student/subscription
pub async fn subscribe(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Json(input): Json<Subscribe>,
) -> AppResult<(StatusCode, Json<DataResponse<SubscriptionReceipt>>)> {
    let receipt = SubscriptionRepo::subscribe(
        &state.pool,
        auth.user_id,
        input.duration,
        input.meal_type,
        today(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

/// GET /api/v1/student/reviews
///
/// Every dish, with the caller's review attached where one exists.
pub async fn list_reviews(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
) -> AppResult<Json<DataResponse<Vec<ReviewableDish>>>> {
    let dishes = DishRepo::list(&state.pool).await?;
    let mut reviews = ReviewRepo::list_for_user(&state.pool, auth.user_id).await?;

    let data = dishes
        .into_iter()
        .map(|dish| {
            let review = reviews
                .iter()
                .position(|r| r.dish_id == dish.id)
                .map(|i| reviews.swap_remove(i));
            ReviewableDish {
                dish_id: dish.id,
                name: dish.name,
                review,
            }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/student/reviews/{dish_id}
///
/// Create or overwrite the caller's review of a dish.
pub async fn upsert_review(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(dish_id): Path<DbId>,
    Json(input): Json<UpsertReview>,
) -> AppResult<Json<DataResponse<Review>>> {
    input.validate()?;
    DishRepo::find_by_id(&state.pool, dish_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dish",
            id: dish_id,
        }))?;

    let review = ReviewRepo::upsert(&state.pool, auth.user_id, dish_id, &input).await?;
    tracing::info!(user_id = auth.user_id, dish_id, rating = review.rating, "Review saved");
    Ok(Json(DataResponse { data: review }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn meal_slot(
    state: &AppState,
    user: &User,
    menu: Option<&Menu>,
    date: Day,
    meal: MealType,
) -> AppResult<MealSlot> {
    let dish_ids = menu.map(|m| m.dish_ids(meal)).unwrap_or_default();
    let dishes = DishRepo::resolve(&state.pool, &dish_ids).await?;
    let total_price = dishes.iter().map(|d| d.price).sum();

    let user_allergens = user.allergen_ids();
    let dishes = DishRepo::with_allergens(&state.pool, dishes)
        .await?
        .into_iter()
        .map(|dish| MenuDish {
            has_allergen: has_allergen_conflict(&user_allergens, &dish.allergen_ids),
            dish,
        })
        .collect();

    let taken = AttendanceRepo::exists(&state.pool, user.id, date, meal).await?;

    Ok(MealSlot {
        meal_type: meal,
        dishes,
        total_price,
        taken,
    })
}

async fn load_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}
