use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Please log in first!")]
    AuthRequired,

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Invalid username or password!")]
    InvalidCredentials,

    #[error("Invalid amount: {0:?} (expected a number from 0 to 1,000,000,000,000)")]
    InvalidAmount(String),

    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Password error: {0}")]
    Password(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
