//! # Salon API
//!
//! [`SalonApi`] names every backend endpoint the workflows rely on. The
//! production implementation is [`HttpClient`]; tests use the `mockall`
//! double in [`crate::mock`].
//!
//! | Operation | Endpoint |
//! |---|---|
//! | List salons | `GET /salons` |
//! | Salon detail | `GET /salons/{id}` |
//! | List services | `GET /salons/{id}/services` |
//! | Create service | `POST /salons/{id}/services` |
//! | Update / delete service | `PUT` / `DELETE /services/{id}` |
//! | List staff | `GET /staff/by-salon/{id}` |
//! | Staff detail | `GET /staff/{id}` |
//! | Available slots | `GET /staff/{id}/availability?date&duration_minutes` |
//! | Create appointment | `POST /appointments` |
//! | List appointments | `GET /appointments` |
//! | Update appointment | `PUT /appointments/{id}` |
//! | List / create time blocks | `GET` / `POST /staff/{id}/time-blocks` |
//! | Update / delete time block | `PUT` / `DELETE /time-blocks/{id}` |

use async_trait::async_trait;
use chrono::NaiveDate;
use salonbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{
            Appointment, AppointmentResponse, AvailabilityResponse, CreateAppointmentRequest,
            ListAppointmentsResponse, UpdateAppointmentRequest,
        },
        salon::{GetSalonResponse, ListSalonsResponse, Salon},
        service::{ListServicesResponse, Service, ServiceDraft, ServiceResponse},
        staff::StaffMember,
        time_block::{ListTimeBlocksResponse, TimeBlock, TimeBlockRequest},
    },
};
use serde::Deserialize;
use serde_json::Value;

use crate::http::HttpClient;

#[async_trait]
pub trait SalonApi: Send + Sync {
    async fn list_salons(&self) -> BookingResult<Vec<Salon>>;

    async fn get_salon(&self, salon_id: i64) -> BookingResult<Salon>;

    async fn list_services(&self, salon_id: i64) -> BookingResult<Vec<Service>>;

    async fn create_service(&self, salon_id: i64, draft: &ServiceDraft) -> BookingResult<Service>;

    async fn update_service(&self, service_id: i64, draft: &ServiceDraft) -> BookingResult<Service>;

    async fn delete_service(&self, service_id: i64) -> BookingResult<()>;

    async fn list_staff(&self, salon_id: i64) -> BookingResult<Vec<StaffMember>>;

    async fn get_staff(&self, staff_id: i64) -> BookingResult<StaffMember>;

    /// Bookable start times for `duration_minutes` on `date`, ascending.
    async fn available_slots(
        &self,
        staff_id: i64,
        date: NaiveDate,
        duration_minutes: i64,
    ) -> BookingResult<Vec<String>>;

    async fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> BookingResult<Appointment>;

    async fn list_appointments(&self) -> BookingResult<Vec<Appointment>>;

    async fn update_appointment(
        &self,
        appointment_id: i64,
        request: &UpdateAppointmentRequest,
    ) -> BookingResult<Appointment>;

    async fn list_time_blocks(&self, staff_id: i64) -> BookingResult<Vec<TimeBlock>>;

    async fn create_time_block(
        &self,
        staff_id: i64,
        request: &TimeBlockRequest,
    ) -> BookingResult<TimeBlock>;

    async fn update_time_block(
        &self,
        block_id: i64,
        request: &TimeBlockRequest,
    ) -> BookingResult<TimeBlock>;

    async fn delete_time_block(&self, block_id: i64) -> BookingResult<()>;
}

/// Time-block writes answer either with the bare block or wrapped in
/// `{"time_block": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TimeBlockBody {
    Wrapped { time_block: TimeBlock },
    Bare(TimeBlock),
}

impl From<TimeBlockBody> for TimeBlock {
    fn from(body: TimeBlockBody) -> Self {
        match body {
            TimeBlockBody::Wrapped { time_block } => time_block,
            TimeBlockBody::Bare(block) => block,
        }
    }
}

pub(crate) fn check_slot_query(staff_id: i64, duration_minutes: i64) -> BookingResult<()> {
    if staff_id <= 0 {
        return Err(BookingError::InvalidInput(
            "Staff ID must be a positive integer".to_string(),
        ));
    }
    if duration_minutes <= 0 {
        return Err(BookingError::InvalidInput(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl SalonApi for HttpClient {
    async fn list_salons(&self) -> BookingResult<Vec<Salon>> {
        let response: ListSalonsResponse = self.get("/salons").await?;
        Ok(response.salons)
    }

    async fn get_salon(&self, salon_id: i64) -> BookingResult<Salon> {
        let response: GetSalonResponse = self.get(&format!("/salons/{}", salon_id)).await?;
        Ok(response.salon)
    }

    async fn list_services(&self, salon_id: i64) -> BookingResult<Vec<Service>> {
        let response: ListServicesResponse =
            self.get(&format!("/salons/{}/services", salon_id)).await?;
        Ok(response.services)
    }

    async fn create_service(&self, salon_id: i64, draft: &ServiceDraft) -> BookingResult<Service> {
        draft.validate()?;
        let response: ServiceResponse = self
            .post(&format!("/salons/{}/services", salon_id), draft)
            .await?;
        Ok(response.service)
    }

    async fn update_service(&self, service_id: i64, draft: &ServiceDraft) -> BookingResult<Service> {
        draft.validate()?;
        let response: ServiceResponse = self.put(&format!("/services/{}", service_id), draft).await?;
        Ok(response.service)
    }

    async fn delete_service(&self, service_id: i64) -> BookingResult<()> {
        let _: Value = self.delete(&format!("/services/{}", service_id)).await?;
        Ok(())
    }

    async fn list_staff(&self, salon_id: i64) -> BookingResult<Vec<StaffMember>> {
        self.get(&format!("/staff/by-salon/{}", salon_id)).await
    }

    async fn get_staff(&self, staff_id: i64) -> BookingResult<StaffMember> {
        self.get(&format!("/staff/{}", staff_id)).await
    }

    async fn available_slots(
        &self,
        staff_id: i64,
        date: NaiveDate,
        duration_minutes: i64,
    ) -> BookingResult<Vec<String>> {
        check_slot_query(staff_id, duration_minutes)?;
        let date = date.format("%Y-%m-%d").to_string();
        let duration = duration_minutes.to_string();
        let response: AvailabilityResponse = self
            .get_with_query(
                &format!("/staff/{}/availability", staff_id),
                &[("date", date.as_str()), ("duration_minutes", duration.as_str())],
            )
            .await?;
        Ok(response.available_slots)
    }

    async fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> BookingResult<Appointment> {
        let response: AppointmentResponse = self.post("/appointments", request).await?;
        Ok(response.appointment)
    }

    async fn list_appointments(&self) -> BookingResult<Vec<Appointment>> {
        let response: ListAppointmentsResponse = self.get("/appointments").await?;
        Ok(response.appointments)
    }

    async fn update_appointment(
        &self,
        appointment_id: i64,
        request: &UpdateAppointmentRequest,
    ) -> BookingResult<Appointment> {
        let response: AppointmentResponse = self
            .put(&format!("/appointments/{}", appointment_id), request)
            .await?;
        Ok(response.appointment)
    }

    async fn list_time_blocks(&self, staff_id: i64) -> BookingResult<Vec<TimeBlock>> {
        let response: ListTimeBlocksResponse =
            self.get(&format!("/staff/{}/time-blocks", staff_id)).await?;
        Ok(response.time_blocks)
    }

    async fn create_time_block(
        &self,
        staff_id: i64,
        request: &TimeBlockRequest,
    ) -> BookingResult<TimeBlock> {
        let body: TimeBlockBody = self
            .post(&format!("/staff/{}/time-blocks", staff_id), request)
            .await?;
        Ok(body.into())
    }

    async fn update_time_block(
        &self,
        block_id: i64,
        request: &TimeBlockRequest,
    ) -> BookingResult<TimeBlock> {
        let body: TimeBlockBody = self.put(&format!("/time-blocks/{}", block_id), request).await?;
        Ok(body.into())
    }

    async fn delete_time_block(&self, block_id: i64) -> BookingResult<()> {
        let _: Value = self.delete(&format!("/time-blocks/{}", block_id)).await?;
        Ok(())
    }
}
