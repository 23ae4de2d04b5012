//! Vendor-side service management.

use salonbook_core::{
    errors::BookingResult,
    models::service::{Service, ServiceDraft},
};
use tracing::info;

use crate::api::SalonApi;

/// Creates a service, or updates `existing` when given. The draft is
/// validated before anything is sent.
pub async fn save_service(
    api: &dyn SalonApi,
    salon_id: i64,
    existing: Option<i64>,
    draft: &ServiceDraft,
) -> BookingResult<Service> {
    draft.validate()?;
    let service = match existing {
        Some(service_id) => api.update_service(service_id, draft).await?,
        None => api.create_service(salon_id, draft).await?,
    };
    info!(service_id = service.id, salon_id, "Saved service");
    Ok(service)
}

/// Deletes a service once `confirm` agrees. Returns whether it was deleted.
pub async fn delete_service<F>(api: &dyn SalonApi, service_id: i64, confirm: F) -> BookingResult<bool>
where
    F: FnOnce() -> bool,
{
    if !confirm() {
        return Ok(false);
    }
    api.delete_service(service_id).await?;
    info!(service_id, "Deleted service");
    Ok(true)
}
