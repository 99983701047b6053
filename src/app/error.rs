use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfportError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::config::ConfigError> for ShelfportError {
    fn from(e: crate::config::ConfigError) -> Self {
        ShelfportError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShelfportError>;
