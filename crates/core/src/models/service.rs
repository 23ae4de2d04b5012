use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// A bookable service offered by a salon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListServicesResponse {
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub service: Service,
}

/// Payload for creating or updating a service from the vendor side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub duration_minutes: i64,
}

impl ServiceDraft {
    pub fn validate(&self) -> BookingResult<()> {
        if self.name.trim().is_empty() {
            return Err(BookingError::InvalidInput(
                "Service name is required".to_string(),
            ));
        }
        if self.price_cents < 0 {
            return Err(BookingError::InvalidInput(
                "Price cannot be negative".to_string(),
            ));
        }
        if self.duration_minutes <= 0 {
            return Err(BookingError::InvalidInput(
                "Duration must be a positive number of minutes".to_string(),
            ));
        }
        Ok(())
    }
}
