//! 核心错误定义

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown line algorithm: {0}")]
    UnknownLineAlgorithm(String),

    #[error("Unknown clip algorithm: {0}")]
    UnknownClipAlgorithm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
