use thiserror::Error;

#[derive(Error, Debug)]
pub enum GravemarchError {
    #[error("Malformed arena map: {0}")]
    MalformedMap(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GravemarchError>;
