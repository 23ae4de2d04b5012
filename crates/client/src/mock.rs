use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use salonbook_core::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest},
        salon::Salon,
        service::{Service, ServiceDraft},
        staff::StaffMember,
        time_block::{TimeBlock, TimeBlockRequest},
    },
};

use crate::api::SalonApi;

// Mock backend for testing workflows
mock! {
    pub SalonBackend {}

    #[async_trait]
    impl SalonApi for SalonBackend {
        async fn list_salons(&self) -> BookingResult<Vec<Salon>>;
        async fn get_salon(&self, salon_id: i64) -> BookingResult<Salon>;
        async fn list_services(&self, salon_id: i64) -> BookingResult<Vec<Service>>;
        async fn create_service(&self, salon_id: i64, draft: &ServiceDraft) -> BookingResult<Service>;
        async fn update_service(&self, service_id: i64, draft: &ServiceDraft) -> BookingResult<Service>;
        async fn delete_service(&self, service_id: i64) -> BookingResult<()>;
        async fn list_staff(&self, salon_id: i64) -> BookingResult<Vec<StaffMember>>;
        async fn get_staff(&self, staff_id: i64) -> BookingResult<StaffMember>;
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
}
