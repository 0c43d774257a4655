use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("fetch error: {0}")]
    Fetch(String),
    #[error("generation error: {0}")]
    Generation(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// The underlying message without the category prefix.
    pub fn message(&self) -> String {
        match self {
            AppError::Configuration(message)
            | AppError::Fetch(message)
            | AppError::Generation(message) => message.clone(),
            AppError::Io(err) => err.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
