// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
    #[error("CLI error: {0}")]
    Cli(String),
}

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The draft failed validation; the caller is expected to gate `confirm`
    /// on `overall_valid`, but the store rejects direct misuse too.
    #[error("Draft failed validation; credential was not stored")]
    InvalidDraft,
}

// Result type aliases for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type StoreResult<T> = Result<T, StoreError>;
