//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-step workflows
//! (`claim_meal`, `top_up`, `subscribe`, `decide`) open their own
//! transaction and lock the affected row before checking anything.

pub mod allergen_repo;
pub mod application_repo;
pub mod attendance_repo;
pub mod dish_repo;
pub mod menu_repo;
pub mod payment_repo;
pub mod product_repo;
pub mod report_repo;
pub mod review_repo;
pub mod session_repo;
pub mod subscription_repo;
pub mod user_repo;

pub use allergen_repo::AllergenRepo;
pub use application_repo::ApplicationRepo;
pub use attendance_repo::AttendanceRepo;
pub use dish_repo::DishRepo;
pub use menu_repo::MenuRepo;
pub use payment_repo::PaymentRepo;
pub use product_repo::ProductRepo;
pub use report_repo::ReportRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
