//! Startup errors for the subscription service

use store_object::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid table definition: {0}")]
    Validation(#[from] ValidationError),
}
