use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpesaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Aborted by user")]
    Aborted,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
}
