use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Database(#[from] database::DatabaseError),

    #[error(transparent)]
    Codec(#[from] types::CodecError),

    #[error(transparent)]
    Registry(#[from] types::RegistryError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
