use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotasError {
    /// Required text was empty or whitespace-only.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl NotasError {
    /// Storage-class failures are recovered from at the component boundary.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            NotasError::Storage(_) | NotasError::Io(_) | NotasError::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NotasError>;
