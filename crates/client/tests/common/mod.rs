#![allow(dead_code)]

use axum::Router;
use salonbook_client::{ClientConfig, HttpClient, Session};
use salonbook_core::models::{
    appointment::{Appointment, AppointmentStatus},
    service::Service,
    staff::{StaffMember, StaffUser},
    time_block::TimeBlock,
};
use serde_json::json;
use tokio::net::TcpListener;

pub fn service(id: i64, duration_minutes: i64) -> Service {
    Service {
        id,
        name: format!("Service {id}"),
        description: String::new(),
        price_cents: 4500,
        duration_minutes,
    }
}

pub fn staff(id: i64) -> StaffMember {
    StaffMember {
        id,
        title: "Senior Stylist".to_string(),
        user: StaffUser {
            name: format!("Stylist {id}"),
        },
        schedule: json!({
            "monday": { "enabled": true, "shifts": [{ "start": "09:00", "end": "17:00" }] }
        }),
    }
}

pub fn appointment(id: i64, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        salon_id: 1,
        staff_id: 20,
        service_id: 10,
        client_id: 7,
        starts_at: "2030-01-07T10:00:00Z".to_string(),
        notes: None,
        status,
    }
}

pub fn time_block(id: i64, starts_at: &str, ends_at: &str) -> TimeBlock {
    TimeBlock {
        id,
        starts_at: starts_at.to_string(),
        ends_at: ends_at.to_string(),
        reason: "Break".to_string(),
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test backend stopped");
    });
    format!("http://{}", addr)
}

pub fn client(base_url: &str, session: Session) -> HttpClient {
    HttpClient::new(&ClientConfig::new(base_url), session).expect("Failed to build client")
}
