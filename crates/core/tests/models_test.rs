use pretty_assertions::assert_eq;
use rstest::rstest;
use salonbook_core::{
    errors::BookingError,
    models::{
        appointment::{
            Appointment, AppointmentStatus, ListAppointmentsResponse, UpdateAppointmentRequest,
        },
        service::{ListServicesResponse, ServiceDraft},
        staff::StaffMember,
        time_block::ListTimeBlocksResponse,
    },
};
use serde_json::{from_value, json, to_value};

#[test]
fn test_appointment_status_wire_names() {
    let appointment: Appointment = from_value(json!({
        "id": 1,
        "salon_id": 2,
        "staff_id": 3,
        "service_id": 4,
        "client_id": 5,
        "starts_at": "2030-01-07T10:00:00Z",
        "notes": null,
        "status": "no-show"
    }))
    .expect("Failed to deserialize appointment");

    assert_eq!(appointment.status, AppointmentStatus::NoShow);
    assert_eq!(to_value(AppointmentStatus::Cancelled).unwrap(), json!("cancelled"));
    assert_eq!("no-show".parse::<AppointmentStatus>(), Ok(AppointmentStatus::NoShow));
    assert!("done".parse::<AppointmentStatus>().is_err());
}

#[rstest]
#[case(AppointmentStatus::Booked, AppointmentStatus::Completed, true)]
#[case(AppointmentStatus::Booked, AppointmentStatus::Cancelled, true)]
#[case(AppointmentStatus::Booked, AppointmentStatus::NoShow, true)]
#[case(AppointmentStatus::Booked, AppointmentStatus::Booked, false)]
#[case(AppointmentStatus::Cancelled, AppointmentStatus::Booked, false)]
#[case(AppointmentStatus::Completed, AppointmentStatus::Cancelled, false)]
#[case(AppointmentStatus::NoShow, AppointmentStatus::Completed, false)]
fn test_status_transitions(
    #[case] from: AppointmentStatus,
    #[case] to: AppointmentStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[test]
fn test_update_request_omits_unset_fields() {
    let request = UpdateAppointmentRequest {
        status: Some(AppointmentStatus::Cancelled),
        starts_at: None,
    };

    assert_eq!(to_value(&request).unwrap(), json!({ "status": "cancelled" }));
}

#[test]
fn test_list_responses_deserialize() {
    let services: ListServicesResponse = from_value(json!({
        "services": [
            { "id": 1, "name": "Cut", "price_cents": 3000, "duration_minutes": 30 }
        ]
    }))
    .unwrap();
    let blocks: ListTimeBlocksResponse = from_value(json!({
        "time_blocks": [
            { "id": 2, "starts_at": "2030-01-07T10:00:00Z", "ends_at": "2030-01-07T11:00:00Z", "reason": "Lunch" }
        ]
    }))
    .unwrap();
    let appointments: ListAppointmentsResponse = from_value(json!({ "appointments": [] })).unwrap();

    assert_eq!(services.services[0].description, "");
    assert_eq!(blocks.time_blocks[0].reason, "Lunch");
    assert!(appointments.appointments.is_empty());
}

#[test]
fn test_staff_schedule_is_normalized_on_demand() {
    let member: StaffMember = from_value(json!({
        "id": 8,
        "title": "Colorist",
        "user": { "name": "Ada" },
        "schedule": { "Monday": { "enabled": true, "shifts": [{ "start": "09:00", "end": "17:00" }] } }
    }))
    .unwrap();

    assert_eq!(member.display_name(), "Ada");
    assert!(member.weekly_schedule().day(chrono::Weekday::Mon).is_working());
    assert!(!member.weekly_schedule().day(chrono::Weekday::Tue).is_working());
}

#[rstest]
#[case("", 1000, 30, "Service name is required")]
#[case("Cut", -1, 30, "Price cannot be negative")]
#[case("Cut", 1000, 0, "Duration must be a positive number of minutes")]
fn test_service_draft_validation(
    #[case] name: &str,
    #[case] price_cents: i64,
    #[case] duration_minutes: i64,
    #[case] message: &str,
) {
    let draft = ServiceDraft {
        name: name.to_string(),
        description: String::new(),
        price_cents,
        duration_minutes,
    };

    match draft.validate() {
        Err(BookingError::InvalidInput(msg)) => assert_eq!(msg, message),
        other => panic!("Expected InvalidInput, got: {:?}", other),
    }
}

#[test]
fn test_free_service_is_valid() {
    let draft = ServiceDraft {
        name: "Consultation".to_string(),
        description: String::new(),
        price_cents: 0,
        duration_minutes: 15,
    };

    assert!(draft.validate().is_ok());
}
