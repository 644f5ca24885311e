//! Clinic store walkthrough
//!
//! Plays the presentation layer against the mock data source: loads the
//! schedule, filters it, completes an appointment and writes a
//! prescription, printing what each screen would show.
//!
//! Usage:
//!   cargo run --bin clinic_demo
//!   CLINIC_FETCH_DELAY_MS=0 RUST_LOG=clinic_store=debug cargo run --bin clinic_demo

use std::sync::Arc;

use anyhow::{Context, Result};
use clinic_store::{
    AppointmentStatus, ClinicError, ClinicStore, MockDataSource, PrescriptionDraft, RootState,
    StatusFilter,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic_store=info".into()),
        )
        .init();

    tracing::info!("Starting clinic demo");
    let source = MockDataSource::from_env().context("reading clinic configuration")?;
    let store = Arc::new(ClinicStore::new(Arc::new(source)));

    let mut updates = store.subscribe();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update();
            tracing::debug!(
                appointments = state.appointments.appointments.len(),
                prescriptions = state.prescriptions.prescriptions.len(),
                loading = state.is_loading(),
                "State updated"
            );
        }
    });

    // Schedule screen
    if let Err(err) = store.fetch_appointments().await {
        println!("Could not load appointments: {}", err.message());
        println!("Retrying...");
        store.fetch_appointments().await?;
    }
    print_schedule(&store.snapshot());

    store.set_filter(StatusFilter::Scheduled);
    print_schedule(&store.snapshot());

    // Detail screen for the first scheduled appointment
    let Some(id) = store.read(|s| s.appointments.visible().first().map(|a| a.id.clone())) else {
        println!("Nothing scheduled today");
        return Ok(());
    };

    let mut draft = PrescriptionDraft::new("Ibuprofen", "200mg", "Take with food");
    match draft.submit(&store, &id).await {
        Ok(_) => {
            draft.clear();
            println!("Prescription created successfully");
        }
        Err(ClinicError::Validation(err)) => println!("Error: {}", err),
        Err(err) => println!("Error: {}", err.message()),
    }

    let outcome = store.update_appointment_status(&id, AppointmentStatus::Completed);
    if outcome.is_found() {
        println!("Appointment marked as {}", AppointmentStatus::Completed);
    }
    print_detail(&store.snapshot(), &id);

    store.set_filter(StatusFilter::All);
    print_schedule(&store.snapshot());

    drop(store);
    watcher.await.ok();
    Ok(())
}

fn print_schedule(state: &RootState) {
    let appointments = &state.appointments;

    let bar: Vec<String> = appointments
        .filter_options()
        .iter()
        .map(|o| {
            let marker = if o.active { "*" } else { " " };
            format!("{}{} ({})", marker, o.label, o.count)
        })
        .collect();
    println!("\n{}", bar.join("  "));

    let visible = appointments.visible();
    if visible.is_empty() {
        println!("  {}", appointments.filter.empty_message());
    }
    for a in visible {
        println!(
            "  {:>8}  {:<18} {:>3}  {:<10} {}",
            a.time,
            a.patient_name,
            a.age,
            a.status.label(),
            a.symptoms
        );
    }
}

fn print_detail(state: &RootState, id: &str) {
    let Some(a) = state.appointments.find(id) else {
        println!("Appointment not found");
        return;
    };

    println!("\n{} (age {}) - {}", a.patient_name, a.age, a.status.label());
    println!("  {} at {}", a.date, a.time);
    println!("  {} / {}", a.phone, a.email);
    println!("  Symptoms: {}", a.symptoms);
    if let Some(notes) = &a.notes {
        println!("  Notes: {}", notes);
    }

    let prescriptions = state.prescriptions.for_appointment(id);
    if prescriptions.is_empty() {
        println!("  No prescriptions yet");
    }
    for p in prescriptions {
        println!("  Rx {} - Dosage: {}", p.medicine_name, p.dosage);
        if p.has_instructions() {
            println!("     {}", p.instructions);
        }
    }
}
