use thiserror::Error;

#[derive(Error, Debug)]
pub enum HutirError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Resource file not found for language: {0}")]
    ResourceNotFound(String),

    #[error("Invalid key path: {0}")]
    InvalidKeyPath(String),

    #[error("Invalid backup archive: {0}")]
    InvalidBackup(String),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
