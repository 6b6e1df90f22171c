use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid master key: must be 32 bytes")]
    InvalidKey,

    #[error("decryption failed: invalid data or wrong key")]
    DecryptionFailed,

    #[error("failed to parse config file: {0}")]
    ConfigParse(String),

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("database not connected")]
    StoreUnavailable,

    #[error("database call exceeded its deadline")]
    Timeout,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
