//! Unified application error type.
//! All modules (db, core, cli) return AppError so that guard and
//! calculator rejections surface to the caller with the specific reason
//! instead of a generic failure.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Engine errors
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Policy violation: {0}")]
    Policy(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Overpayment: payment of {attempted:.2} exceeds remaining balance of {remaining:.2}")]
    Overpayment { attempted: f64, remaining: f64 },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration file error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
