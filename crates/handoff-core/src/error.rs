use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("file not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("invalid step id '{0}': expected an integer, 'next' or 'status'")]
    InvalidStepId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HandoffError>;
