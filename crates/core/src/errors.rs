use thiserror::Error;

/// Reasons a proposed time block is rejected before it reaches the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockValidationError {
    #[error("Invalid date")]
    InvalidDate,

    #[error("Staff is not scheduled to work this day")]
    NotScheduled,

    #[error("Invalid time")]
    InvalidTime,

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Blocked time must fall within scheduled working hours")]
    OutsideWorkingHours,

    #[error("Invalid start/end time")]
    InvalidDateTime,

    #[error("Blocked time must start in the future")]
    InPast,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(#[from] BlockValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] eyre::Report),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Text to show the user. Backend messages are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            BookingError::Validation(e) => e.to_string(),
            BookingError::InvalidInput(msg) => msg.clone(),
            BookingError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status code carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BookingError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
