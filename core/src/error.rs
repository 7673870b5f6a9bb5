use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("environment variable {0} is not set")]
    MissingEnv(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Connection, query or row decoding failure, carried as produced by the driver
    #[error(transparent)]
    Database(Box<dyn std::error::Error + Send + Sync>),
    #[error("operation cancelled")]
    Cancelled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub fn database<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Database(Box::new(error))
    }
}
