use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("integer overflow: {0} does not fit in i32")]
    IntegerOverflow(i64),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected HTTP status: {0}")]
    UnexpectedStatus(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error("deadline exceeded: {0}")]
    DeadlineExceeded(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
