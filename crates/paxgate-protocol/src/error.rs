use paxgate_domain::DomainError;
use thiserror::Error;

pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort { expected: usize, actual: usize },

    #[error("frame exceeds maximum size of {max} bytes")]
    FrameTooLarge { max: usize },

    #[error("frame payload is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("tag not found: {0}")]
    TagNotFound(String),

    #[error("unrecognized message kind")]
    UnrecognizedMessageKind,

    #[error("malformed sensor report: {0}")]
    MalformedSensorReport(String),

    #[error("unknown device: {0}")]
    UnknownDevice(String),

    #[error("store error: {0}")]
    Store(#[from] DomainError),
}
