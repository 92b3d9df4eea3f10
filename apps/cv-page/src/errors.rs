use thiserror::Error;

/// Failure at the key-value storage boundary.
/// Callers on the analytics path treat every variant as "skip silently".
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable")]
    Unavailable,

    #[error("Storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Application-level error type.
/// Returned by controller operations whose failure the session must report.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-readable code, printed alongside the message by the session driver.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::InvalidCommand(_) => "INVALID_COMMAND",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "INTERNAL_ERROR"
            }
        }
    }
}
