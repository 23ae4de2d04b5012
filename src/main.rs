use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use eyre::{eyre, Result};
use dotenv::dotenv;
use salonbook_client::{
    workflows::{
        appointments, booking::BookingWorkflow, catalog,
        time_blocks::{TimeBlockForm, TimeBlockManager},
    },
    ClientConfig, HttpClient, SalonApi,
};
use salonbook_core::{
    booking::{BookingEvent, BookingStage},
    errors::BookingError,
    models::{
        appointment::{Appointment, AppointmentStatus},
        service::ServiceDraft,
    },
    time_block::TimeBlockDraft,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "salonbook", about = "Book and manage salon appointments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List salons
    Salons,
    /// List a salon's services
    Services {
        #[arg(long)]
        salon: i64,
    },
    /// Create or update a service
    ServiceSave {
        #[arg(long)]
        salon: i64,
        /// Existing service to update
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price_cents: i64,
        #[arg(long)]
        duration: i64,
    },
    /// Delete a service
    ServiceDelete {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// List a salon's staff
    Staff {
        #[arg(long)]
        salon: i64,
    },
    /// Show bookable start times
    Slots {
        #[arg(long)]
        staff: i64,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        duration: i64,
    },
    /// Book an appointment
    Book {
        #[arg(long)]
        salon: i64,
        #[arg(long)]
        service: i64,
        #[arg(long)]
        staff: i64,
        #[arg(long)]
        date: NaiveDate,
        /// Start time to book; defaults to the first available slot
        #[arg(long)]
        slot: Option<String>,
        #[arg(long)]
        client: i64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Manage existing appointments
    Appointments {
        #[command(subcommand)]
        action: AppointmentAction,
    },
    /// Manage staff time blocks
    Blocks {
        #[command(subcommand)]
        action: BlockAction,
    },
}

#[derive(Subcommand)]
enum AppointmentAction {
    List,
    Cancel {
        #[arg(long)]
        id: i64,
    },
    Reschedule {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        slot: String,
    },
    /// Set completed, cancelled or no-show
    Status {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        status: AppointmentStatus,
    },
}

#[derive(Subcommand)]
enum BlockAction {
    List {
        #[arg(long)]
        staff: i64,
    },
    Create {
        #[arg(long)]
        staff: i64,
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        staff: i64,
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    Delete {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        staff: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let client = HttpClient::new(&config, config.session()).map_err(to_report)?;
    info!(api_url = %client.base_url(), authenticated = client.session().is_authenticated(), "Client ready");

    run(cli.command, Arc::new(client), &config).await
}

async fn run(command: Command, api: Arc<HttpClient>, config: &ClientConfig) -> Result<()> {
    match command {
        Command::Salons => {
            for salon in api.list_salons().await.map_err(to_report)? {
                println!("{:>5}  {}", salon.id, salon.name);
            }
        }

        Command::Services { salon } => {
            for service in api.list_services(salon).await.map_err(to_report)? {
                println!(
                    "{:>5}  {} ({} min, {})",
                    service.id,
                    service.name,
                    service.duration_minutes,
                    format_price(service.price_cents)
                );
            }
        }

        Command::ServiceSave {
            salon,
            id,
            name,
            description,
            price_cents,
            duration,
        } => {
            let draft = ServiceDraft {
                name,
                description,
                price_cents,
                duration_minutes: duration,
            };
            let service = catalog::save_service(api.as_ref(), salon, id, &draft)
                .await
                .map_err(to_report)?;
            println!("Saved service {} ({})", service.id, service.name);
        }

        Command::ServiceDelete { id, yes } => {
            let deleted = catalog::delete_service(api.as_ref(), id, || {
                yes || confirm(&format!("Delete service {}?", id))
            })
            .await
            .map_err(to_report)?;
            println!("{}", if deleted { "Deleted" } else { "Kept" });
        }

        Command::Staff { salon } => {
            for member in api.list_staff(salon).await.map_err(to_report)? {
                println!("{:>5}  {} - {}", member.id, member.display_name(), member.title);
            }
        }

        Command::Slots {
            staff,
            date,
            duration,
        } => {
            let slots = api
                .available_slots(staff, date, duration)
                .await
                .map_err(to_report)?;
            if slots.is_empty() {
                println!("No available times on {}", date);
            }
            for slot in slots {
                println!("{}", slot);
            }
        }

        Command::Book {
            salon,
            service,
            staff,
            date,
            slot,
            client,
            notes,
        } => {
            let mut workflow = BookingWorkflow::new(api);
            workflow.apply(BookingEvent::SelectSalon(salon)).await;
            workflow.apply(BookingEvent::SelectService(service)).await;
            workflow.apply(BookingEvent::SelectStaff(staff)).await;
            workflow.apply(BookingEvent::SetNotes(notes)).await;
            let form = workflow.apply(BookingEvent::SetDate(date)).await;
            if let Some(error) = form.error() {
                return Err(eyre!("{}", error));
            }
            if form.stage() != BookingStage::DateSelected {
                return Err(eyre!("Unknown salon, service or staff member"));
            }

            let slot = match slot.or_else(|| form.slots().first().cloned()) {
                Some(slot) => slot,
                None => return Err(eyre!("No available times on {}", date)),
            };
            workflow.apply(BookingEvent::SelectSlot(slot.clone())).await;
            if workflow.form().stage() != BookingStage::SlotSelected {
                return Err(eyre!("{} is not an available time", slot));
            }

            let form = workflow.apply(BookingEvent::Submit { client_id: client }).await;
            match form.confirmation() {
                Some(appointment) => println!(
                    "Booked appointment {} at {}",
                    appointment.id, appointment.starts_at
                ),
                None => {
                    return Err(eyre!(
                        "{}",
                        form.error().unwrap_or("Booking was not confirmed")
                    ))
                }
            }
        }

        Command::Appointments { action } => run_appointment_action(action, api.as_ref()).await?,

        Command::Blocks { action } => run_block_action(action, api.as_ref(), config).await?,
    }

    Ok(())
}

async fn run_appointment_action(action: AppointmentAction, api: &dyn SalonApi) -> Result<()> {
    match action {
        AppointmentAction::List => {
            for appointment in api.list_appointments().await.map_err(to_report)? {
                println!(
                    "{:>5}  {}  {}  salon {} staff {}",
                    appointment.id,
                    appointment.starts_at,
                    appointment.status.as_str(),
                    appointment.salon_id,
                    appointment.staff_id
                );
            }
        }

        AppointmentAction::Cancel { id } => {
            let appointment = find_appointment(api, id).await?;
            let updated = appointments::cancel(api, &appointment)
                .await
                .map_err(to_report)?;
            println!("Appointment {} is now {}", updated.id, updated.status.as_str());
        }

        AppointmentAction::Reschedule { id, date, slot } => {
            let appointment = find_appointment(api, id).await?;
            let duration = api
                .list_services(appointment.salon_id)
                .await
                .map_err(to_report)?
                .into_iter()
                .find(|s| s.id == appointment.service_id)
                .map(|s| s.duration_minutes)
                .ok_or_else(|| eyre!("Service {} not found", appointment.service_id))?;
            let updated = appointments::reschedule(api, &appointment, duration, date, &slot)
                .await
                .map_err(to_report)?;
            println!("Appointment {} moved to {}", updated.id, updated.starts_at);
        }

        AppointmentAction::Status { id, status } => {
            let appointment = find_appointment(api, id).await?;
            let updated = appointments::set_status(api, &appointment, status)
                .await
                .map_err(to_report)?;
            println!("Appointment {} is now {}", updated.id, updated.status.as_str());
        }
    }

    Ok(())
}

async fn find_appointment(api: &dyn SalonApi, id: i64) -> Result<Appointment> {
    api.list_appointments()
        .await
        .map_err(to_report)?
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| eyre!("Appointment {} not found", id))
}

async fn run_block_action(
    action: BlockAction,
    api: &dyn SalonApi,
    config: &ClientConfig,
) -> Result<()> {
    let tz = config.timezone;

    match action {
        BlockAction::List { staff } => {
            let manager = TimeBlockManager::new(api, staff, tz);
            for block in manager.load(Utc::now()).await.map_err(to_report)? {
                println!(
                    "{:>5}  {} -> {}  {}",
                    block.id, block.starts_at, block.ends_at, block.reason
                );
            }
        }

        BlockAction::Create {
            staff,
            date,
            start,
            end,
            reason,
        } => {
            let form = TimeBlockForm {
                draft: TimeBlockDraft::new(date, start, end, reason),
                ..TimeBlockForm::new()
            };
            submit_block(api, staff, tz, form).await?;
        }

        BlockAction::Update {
            id,
            staff,
            date,
            start,
            end,
            reason,
        } => {
            let form = TimeBlockForm {
                draft: TimeBlockDraft::new(date, start, end, reason),
                editing: Some(id),
                error: None,
            };
            submit_block(api, staff, tz, form).await?;
        }

        BlockAction::Delete { id, staff, yes } => {
            let manager = TimeBlockManager::new(api, staff, tz);
            let deleted = manager
                .delete(id, || yes || confirm(&format!("Delete time block {}?", id)))
                .await
                .map_err(to_report)?;
            println!("{}", if deleted { "Deleted" } else { "Kept" });
        }
    }

    Ok(())
}

async fn submit_block(
    api: &dyn SalonApi,
    staff_id: i64,
    tz: Tz,
    mut form: TimeBlockForm,
) -> Result<()> {
    let schedule = api
        .get_staff(staff_id)
        .await
        .map_err(to_report)?
        .weekly_schedule();
    let manager = TimeBlockManager::new(api, staff_id, tz);

    match form.submit(&manager, &schedule, Utc::now()).await {
        Some(block) => {
            println!(
                "Saved time block {}: {} -> {}",
                block.id, block.starts_at, block.ends_at
            );
            Ok(())
        }
        None => Err(eyre!(
            "{}",
            form.error.as_deref().unwrap_or("Time block was not saved")
        )),
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            warn!("Failed to read confirmation: {}", e);
            false
        }
    }
}

fn format_price(price_cents: i64) -> String {
    let sign = if price_cents < 0 { "-" } else { "" };
    let cents = price_cents.unsigned_abs();
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

fn to_report(err: BookingError) -> eyre::Report {
    eyre!("{}", err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(4500), "45.00");
        assert_eq!(format_price(5), "0.05");
        assert_eq!(format_price(-150), "-1.50");
        assert_eq!(format_price(-5), "-0.05");
    }
}
