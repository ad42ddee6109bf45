use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Invalid transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("Already in target state")]
    AlreadyInTargetState,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Concurrent update conflict, retry the operation")]
    ConcurrencyConflict,

    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        StorageError::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Serialization failures, deadlocks and lock timeouts are retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if matches!(e.code().as_deref(), Some("40001" | "40P01" | "55P03"))
        ) || matches!(self, StorageError::ConcurrencyConflict)
    }

    /// Collapse raw database errors into the taxonomy the web layer reports.
    pub fn classify(self) -> Self {
        if self.is_retryable() {
            return StorageError::ConcurrencyConflict;
        }
        if self.is_unique_violation() {
            let detail = match &self {
                StorageError::Database(sqlx::Error::Database(e)) => e
                    .constraint()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unique constraint".to_string()),
                _ => "unique constraint".to_string(),
            };
            return StorageError::IntegrityViolation(detail);
        }
        self
    }
}
