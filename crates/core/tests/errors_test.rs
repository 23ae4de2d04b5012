use std::error::Error;

use salonbook_core::errors::{BlockValidationError, BookingError, BookingResult};

#[test]
fn test_booking_error_display() {
    let validation = BookingError::Validation(BlockValidationError::InPast);
    let input = BookingError::InvalidInput("Duration must be positive".to_string());
    let http = BookingError::Http {
        status: 409,
        message: "Slot already taken".to_string(),
    };
    let network = BookingError::Network(eyre::eyre!("connection refused"));
    let decode = BookingError::Decode("expected an object".to_string());

    assert_eq!(
        validation.to_string(),
        "Validation error: Blocked time must start in the future"
    );
    assert_eq!(input.to_string(), "Invalid input: Duration must be positive");
    assert_eq!(
        http.to_string(),
        "Request failed with status 409: Slot already taken"
    );
    assert!(network.to_string().contains("connection refused"));
    assert!(decode.to_string().starts_with("Invalid response:"));
}

#[test]
fn test_user_message_passes_backend_text_through() {
    let http = BookingError::Http {
        status: 422,
        message: "Staff is on holiday".to_string(),
    };

    assert_eq!(http.user_message(), "Staff is on holiday");
    assert_eq!(http.status(), Some(422));
    assert_eq!(
        BookingError::from(BlockValidationError::NotScheduled).user_message(),
        "Staff is not scheduled to work this day"
    );
}

#[test]
fn test_internal_error_keeps_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let boxed: Box<dyn Error + Send + Sync> = Box::new(io_error);
    let error = BookingError::from(boxed);

    assert!(error.source().is_some());
    assert_eq!(error.status(), None);
}

#[test]
fn test_booking_result() {
    let ok: BookingResult<i32> = Ok(42);
    assert_eq!(ok.unwrap(), 42);

    let err: BookingResult<i32> = Err(BlockValidationError::InvalidDate.into());
    assert!(matches!(
        err,
        Err(BookingError::Validation(BlockValidationError::InvalidDate))
    ));
}
