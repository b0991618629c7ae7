/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date (menus, attendance, payments are day-granular).
pub type Day = chrono::NaiveDate;

/// Money amounts are whole currency units.
pub type Money = i64;

/// The current calendar day in UTC.
pub fn today() -> Day {
    chrono::Utc::now().date_naive()
}
