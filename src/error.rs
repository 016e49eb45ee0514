// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Invalid effort rating {0} (expected 1=Easy, 2=Medium, 3=Hard)")]
    InvalidRating(i64),

    #[error("Problem not found: {0}")]
    ProblemNotFound(String),

    #[error("Next review {0} days out is past the supported date range")]
    ScheduleOutOfRange(i64),

    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("Seed parse error: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not open browser: {0}")]
    Browser(String),
}

pub type Result<T> = std::result::Result<T, StudyError>;
