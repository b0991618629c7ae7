use canteen_core::error::CoreError;

/// Error returned by multi-step workflows that mix domain checks with
/// database writes.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A business rule rejected the operation; nothing was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// `true` if `err` is a unique violation on the named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
