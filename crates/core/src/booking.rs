//! # Booking Form State Machine
//!
//! The four-step booking form (salon, service, staff, date and time) is a
//! single reducer: [`reduce`] takes the current [`BookingForm`] and a
//! [`BookingEvent`] and returns the next form plus the [`Effect`]s the caller
//! must run. Resetting downstream selections is part of each transition, so
//! no stale service, staff, date or slot can survive a change further up.
//!
//! ## Stages
//!
//! ```text
//! NoSalon -> SalonSelected -> ServiceSelected -> StaffSelected
//!         -> DateSelected -> SlotSelected -> Submitted
//! ```
//!
//! ## Stale results
//!
//! Every fetch effect carries a generation number. Selecting a salon bumps the
//! salon generation; changing the service, staff or date bumps the slot
//! generation. A result whose generation is not the current one is dropped,
//! so the last request wins regardless of which response arrives last.
//!
//! While a submission is in flight the selection cannot change, so its
//! success or failure always applies to the form that was submitted.

use std::time::Duration;

use chrono::NaiveDate;

use crate::models::{
    appointment::{Appointment, CreateAppointmentRequest},
    service::Service,
    staff::StaffMember,
};

/// Delay between a successful submission and the redirect away from the form.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    NoSalon,
    SalonSelected,
    ServiceSelected,
    StaffSelected,
    DateSelected,
    SlotSelected,
    Submitted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    SelectSalon(i64),
    SalonDataLoaded {
        generation: u64,
        services: Result<Vec<Service>, String>,
        staff: Result<Vec<StaffMember>, String>,
    },
    SelectService(i64),
    SelectStaff(i64),
    SetDate(NaiveDate),
    SlotsLoaded {
        generation: u64,
        slots: Result<Vec<String>, String>,
    },
    SelectSlot(String),
    SetNotes(Option<String>),
    Submit {
        client_id: i64,
    },
    SubmitSucceeded(Appointment),
    SubmitFailed(String),
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the salon's services and staff in parallel.
    FetchSalonData { generation: u64, salon_id: i64 },
    FetchSlots {
        generation: u64,
        staff_id: i64,
        date: NaiveDate,
        duration_minutes: i64,
    },
    CreateAppointment(CreateAppointmentRequest),
    Redirect { after: Duration },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    salon_id: Option<i64>,
    services: Vec<Service>,
    staff: Vec<StaffMember>,
    service_id: Option<i64>,
    staff_id: Option<i64>,
    date: Option<NaiveDate>,
    slots: Vec<String>,
    slot: Option<String>,
    notes: Option<String>,
    loading_salon: bool,
    loading_slots: bool,
    submitting: bool,
    error: Option<String>,
    confirmation: Option<Appointment>,
    salon_generation: u64,
    slot_generation: u64,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> BookingStage {
        if self.salon_id.is_none() {
            return if self.confirmation.is_some() {
                BookingStage::Submitted
            } else {
                BookingStage::NoSalon
            };
        }
        if self.service_id.is_none() {
            BookingStage::SalonSelected
        } else if self.staff_id.is_none() {
            BookingStage::ServiceSelected
        } else if self.date.is_none() {
            BookingStage::StaffSelected
        } else if self.slot.is_none() {
            BookingStage::DateSelected
        } else {
            BookingStage::SlotSelected
        }
    }

    pub fn salon_id(&self) -> Option<i64> {
        self.salon_id
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    pub fn service_id(&self) -> Option<i64> {
        self.service_id
    }

    pub fn staff_id(&self) -> Option<i64> {
        self.staff_id
    }

    pub fn selected_service(&self) -> Option<&Service> {
        let id = self.service_id?;
        self.services.iter().find(|s| s.id == id)
    }

    pub fn selected_staff(&self) -> Option<&StaffMember> {
        let id = self.staff_id?;
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn slot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading_salon || self.loading_slots
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_submit(&self) -> bool {
        self.stage() == BookingStage::SlotSelected && !self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&Appointment> {
        self.confirmation.as_ref()
    }

    pub fn salon_generation(&self) -> u64 {
        self.salon_generation
    }

    pub fn slot_generation(&self) -> u64 {
        self.slot_generation
    }

    /// An empty form that still outdates every request issued so far.
    fn fresh(&self) -> Self {
        Self {
            salon_generation: self.salon_generation + 1,
            slot_generation: self.slot_generation + 1,
            ..Self::default()
        }
    }

    fn clear_date_and_slots(&mut self) {
        self.date = None;
        self.slots.clear();
        self.slot = None;
        self.loading_slots = false;
        self.slot_generation += 1;
    }
}

pub fn reduce(form: BookingForm, event: BookingEvent) -> (BookingForm, Vec<Effect>) {
    let mut form = form;

    // The selection is frozen until the submission in flight settles.
    if form.submitting
        && matches!(
            event,
            BookingEvent::SelectSalon(_)
                | BookingEvent::SelectService(_)
                | BookingEvent::SelectStaff(_)
                | BookingEvent::SetDate(_)
                | BookingEvent::SelectSlot(_)
                | BookingEvent::Reset
        )
    {
        return (form, Vec::new());
    }

    match event {
        BookingEvent::SelectSalon(salon_id) => {
            let mut next = form.fresh();
            next.salon_id = Some(salon_id);
            next.notes = form.notes;
            next.loading_salon = true;
            let effect = Effect::FetchSalonData {
                generation: next.salon_generation,
                salon_id,
            };
            (next, vec![effect])
        }

        BookingEvent::SalonDataLoaded {
            generation,
            services,
            staff,
        } => {
            if form.salon_id.is_none() || generation != form.salon_generation {
                return (form, Vec::new());
            }
            form.loading_salon = false;
            let mut errors = Vec::new();
            match services {
                Ok(services) => form.services = services,
                Err(message) => errors.push(message),
            }
            match staff {
                Ok(staff) => form.staff = staff,
                Err(message) => errors.push(message),
            }
            form.error = (!errors.is_empty()).then(|| errors.join("; "));
            (form, Vec::new())
        }

        BookingEvent::SelectService(service_id) => {
            if !form.services.iter().any(|s| s.id == service_id) {
                return (form, Vec::new());
            }
            form.service_id = Some(service_id);
            form.error = None;
            form.clear_date_and_slots();
            (form, Vec::new())
        }

        BookingEvent::SelectStaff(staff_id) => {
            if form.service_id.is_none() || !form.staff.iter().any(|s| s.id == staff_id) {
                return (form, Vec::new());
            }
            form.staff_id = Some(staff_id);
            form.error = None;
            form.clear_date_and_slots();
            (form, Vec::new())
        }

        BookingEvent::SetDate(date) => {
            let (Some(staff_id), Some(duration_minutes)) = (
                form.staff_id,
                form.selected_service().map(|s| s.duration_minutes),
            ) else {
                return (form, Vec::new());
            };
            form.clear_date_and_slots();
            form.date = Some(date);
            form.loading_slots = true;
            form.error = None;
            let effect = Effect::FetchSlots {
                generation: form.slot_generation,
                staff_id,
                date,
                duration_minutes,
            };
            (form, vec![effect])
        }

        BookingEvent::SlotsLoaded { generation, slots } => {
            if form.date.is_none() || generation != form.slot_generation {
                return (form, Vec::new());
            }
            form.loading_slots = false;
            match slots {
                Ok(slots) => form.slots = slots,
                Err(message) => form.error = Some(message),
            }
            (form, Vec::new())
        }

        BookingEvent::SelectSlot(slot) => {
            if form.date.is_none() || !form.slots.contains(&slot) {
                return (form, Vec::new());
            }
            form.slot = Some(slot);
            form.error = None;
            (form, Vec::new())
        }

        BookingEvent::SetNotes(notes) => {
            form.notes = notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty());
            (form, Vec::new())
        }

        BookingEvent::Submit { client_id } => {
            if !form.can_submit() {
                return (form, Vec::new());
            }
            let (Some(salon_id), Some(staff_id), Some(service_id), Some(starts_at)) = (
                form.salon_id,
                form.staff_id,
                form.service_id,
                form.slot.clone(),
            ) else {
                return (form, Vec::new());
            };
            form.submitting = true;
            form.error = None;
            let request = CreateAppointmentRequest {
                salon_id,
                staff_id,
                service_id,
                client_id,
                starts_at,
                notes: form.notes.clone(),
            };
            (form, vec![Effect::CreateAppointment(request)])
        }

        BookingEvent::SubmitSucceeded(appointment) => {
            if !form.submitting {
                return (form, Vec::new());
            }
            let mut next = form.fresh();
            next.confirmation = Some(appointment);
            (
                next,
                vec![Effect::Redirect {
                    after: REDIRECT_DELAY,
                }],
            )
        }

        BookingEvent::SubmitFailed(message) => {
            if !form.submitting {
                return (form, Vec::new());
            }
            form.submitting = false;
            form.error = Some(message);
            (form, Vec::new())
        }

        BookingEvent::Reset => (form.fresh(), Vec::new()),
    }
}
