use thiserror::Error;

pub type Result<T> = std::result::Result<T, SvdError>;

#[derive(Debug, Error)]
pub enum SvdError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("format error: {reason}")]
    Format { reason: String },

    #[error("rating source holds more than {capacity} rows")]
    CapacityExceeded { capacity: usize },

    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl SvdError {
    pub fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for SvdError {
    fn from(err: csv::Error) -> Self {
        let reason = match err.position() {
            Some(pos) => format!("line {}: {}", pos.line(), err),
            None => err.to_string(),
        };
        match err.into_kind() {
            csv::ErrorKind::Io(e) => SvdError::Io(e),
            _ => SvdError::Format { reason },
        }
    }
}
