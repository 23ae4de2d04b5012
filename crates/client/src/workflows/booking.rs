//! # Booking Workflow Driver
//!
//! Runs the effects produced by the booking reducer in
//! `salonbook_core::booking`. Each effect becomes a task on a `JoinSet`; its
//! outcome is fed back into the reducer as a new event.
//!
//! Two mechanisms keep stale data out of the form:
//!
//! - starting a fetch aborts the previous in-flight fetch of the same kind
//! - results that still arrive are discarded by the reducer's generation check

use std::{sync::Arc, time::Duration};

use salonbook_core::booking::{reduce, BookingEvent, BookingForm, Effect};
use tokio::task::{AbortHandle, JoinSet};
use tracing::{debug, error, info};

use crate::api::SalonApi;

pub struct BookingWorkflow {
    api: Arc<dyn SalonApi>,
    form: BookingForm,
    tasks: JoinSet<BookingEvent>,
    salon_fetch: Option<AbortHandle>,
    slot_fetch: Option<AbortHandle>,
    redirect: Option<Duration>,
}

impl BookingWorkflow {
    pub fn new(api: Arc<dyn SalonApi>) -> Self {
        Self {
            api,
            form: BookingForm::new(),
            tasks: JoinSet::new(),
            salon_fetch: None,
            slot_fetch: None,
            redirect: None,
        }
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    /// True while any spawned request has not been applied yet.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Applies `event` and starts the resulting requests without waiting.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, event: BookingEvent) {
        let form = std::mem::take(&mut self.form);
        let (next, effects) = reduce(form, event);
        debug!(stage = ?next.stage(), effects = effects.len(), "Booking form updated");
        self.form = next;

        for effect in effects {
            self.start(effect);
        }
    }

    /// Waits for every in-flight request, applying each result as it lands.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(event) => self.dispatch(event),
                Err(e) if e.is_cancelled() => debug!("Superseded booking request aborted"),
                Err(e) => error!("Booking request task failed: {:?}", e),
            }
        }
    }

    /// Dispatches `event` and waits until the form is quiet again.
    pub async fn apply(&mut self, event: BookingEvent) -> &BookingForm {
        self.dispatch(event);
        self.settle().await;
        &self.form
    }

    /// The pending redirect after a successful booking, if any.
    pub fn take_redirect(&mut self) -> Option<Duration> {
        self.redirect.take()
    }

    fn start(&mut self, effect: Effect) {
        match effect {
            Effect::FetchSalonData {
                generation,
                salon_id,
            } => {
                if let Some(previous) = self.salon_fetch.take() {
                    previous.abort();
                }
                let api = Arc::clone(&self.api);
                let handle = self.tasks.spawn(async move {
                    let (services, staff) =
                        tokio::join!(api.list_services(salon_id), api.list_staff(salon_id));
                    BookingEvent::SalonDataLoaded {
                        generation,
                        services: services.map_err(|e| e.user_message()),
                        staff: staff.map_err(|e| e.user_message()),
                    }
                });
                self.salon_fetch = Some(handle);
                // Slots belong to the previous salon's staff.
                if let Some(previous) = self.slot_fetch.take() {
                    previous.abort();
                }
            }

            Effect::FetchSlots {
                generation,
                staff_id,
                date,
                duration_minutes,
            } => {
                if let Some(previous) = self.slot_fetch.take() {
                    previous.abort();
                }
                let api = Arc::clone(&self.api);
                let handle = self.tasks.spawn(async move {
                    let slots = api
                        .available_slots(staff_id, date, duration_minutes)
                        .await
                        .map_err(|e| e.user_message());
                    BookingEvent::SlotsLoaded { generation, slots }
                });
                self.slot_fetch = Some(handle);
            }

            Effect::CreateAppointment(request) => {
                let api = Arc::clone(&self.api);
                self.tasks.spawn(async move {
                    match api.create_appointment(&request).await {
                        Ok(appointment) => {
                            info!(appointment_id = appointment.id, "Appointment booked");
                            BookingEvent::SubmitSucceeded(appointment)
                        }
                        Err(e) => {
                            error!("Failed to book appointment: {}", e);
                            BookingEvent::SubmitFailed(e.user_message())
                        }
                    }
                });
            }

            Effect::Redirect { after } => {
                self.redirect = Some(after);
            }
        }
    }
}
