use thiserror::Error;

/// Outcome kinds every store operation is allowed to report. Raw sqlx errors
/// never cross the store boundary except wrapped in `Database`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    Duplicate,

    #[error("record not found")]
    NotFound,

    #[error("no fields provided for update")]
    EmptyUpdate,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// SQLite reports 2067 (UNIQUE) or 1555 (PRIMARY KEY) for constraint hits.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.code().as_deref(), Some("2067") | Some("1555"))
        }
        _ => false,
    }
}
