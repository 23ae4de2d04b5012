//! Cancelling, rescheduling and closing out existing appointments.

use chrono::NaiveDate;
use salonbook_core::{
    errors::{BookingError, BookingResult},
    models::appointment::{Appointment, AppointmentStatus, UpdateAppointmentRequest},
};
use tracing::info;

use crate::api::SalonApi;

pub async fn set_status(
    api: &dyn SalonApi,
    appointment: &Appointment,
    status: AppointmentStatus,
) -> BookingResult<Appointment> {
    if !appointment.status.can_transition_to(status) {
        return Err(BookingError::InvalidInput(format!(
            "Cannot change a {} appointment to {}",
            appointment.status.as_str(),
            status.as_str()
        )));
    }

    let request = UpdateAppointmentRequest {
        status: Some(status),
        ..Default::default()
    };
    let updated = api.update_appointment(appointment.id, &request).await?;
    info!(appointment_id = updated.id, status = status.as_str(), "Appointment status changed");
    Ok(updated)
}

pub async fn cancel(api: &dyn SalonApi, appointment: &Appointment) -> BookingResult<Appointment> {
    set_status(api, appointment, AppointmentStatus::Cancelled).await
}

/// Moves a booked appointment to `new_slot`, which must be one of the slots
/// the availability query currently offers for that staff member.
pub async fn reschedule(
    api: &dyn SalonApi,
    appointment: &Appointment,
    duration_minutes: i64,
    date: NaiveDate,
    new_slot: &str,
) -> BookingResult<Appointment> {
    if appointment.status != AppointmentStatus::Booked {
        return Err(BookingError::InvalidInput(format!(
            "Only booked appointments can be rescheduled, this one is {}",
            appointment.status.as_str()
        )));
    }

    let slots = api
        .available_slots(appointment.staff_id, date, duration_minutes)
        .await?;
    if !slots.iter().any(|slot| slot == new_slot) {
        return Err(BookingError::InvalidInput(
            "The selected time is no longer available".to_string(),
        ));
    }

    let request = UpdateAppointmentRequest {
        starts_at: Some(new_slot.to_string()),
        ..Default::default()
    };
    let updated = api.update_appointment(appointment.id, &request).await?;
    info!(appointment_id = updated.id, starts_at = %updated.starts_at, "Appointment rescheduled");
    Ok(updated)
}
