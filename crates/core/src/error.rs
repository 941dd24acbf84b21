use thiserror::Error;

pub type RetentionResult<T> = Result<T, RetentionError>;

#[derive(Error, Debug)]
pub enum RetentionError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Category dimension error: {0}")]
    Dimension(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
