//! shift: one simulated ER shift through every er_flow component.
//!
//! Arrivals are triaged onto the heap, moved into the waiting room, and
//! called back into rooms with a provider.  Treatment actions are recorded
//! (one is undone), lab tests are queued, and the floor graph is queried for
//! a staff route and the busiest resources.  Door-to-provider times are
//! summarised per ESI level at the end.
//!
//! Set `RUST_LOG=debug` to see stale-ticket discards and stack rebuilds.

mod floor;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use er_core::{AcuityLevel, BloodPressure, FlowConfig, ManualClock, PatientId, VitalSigns};
use er_graph::ResourceKind;
use er_triage::{
    ActionType, InMemoryDirectory, InMemoryHistoryStore, LabQueue, LabRequest, MetricsTracker,
    NewAction, TreatmentHistory, TriageRequest, TriageScheduler, WaitingRoomScheduler,
};

use floor::build_floor;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 42;
const SHIFT_START: i64 = 1_700_000_000; // fixed reference Monday 00:00 UTC

/// `(name, acuity, minutes already waited, heart rate, blood pressure, SpO2)`
const ARRIVALS: [(&str, u8, u32, f64, &str, f64); 5] = [
    ("Alice Moreau", 3, 45, 88.0, "128/82", 97.0),
    ("Bilal Haddad", 2, 10, 132.0, "165/95", 94.0),
    ("Chen Wei", 4, 120, 76.0, "118/76", 99.0),
    ("Dana Kowalski", 1, 0, 44.0, "84/50", 89.0),
    ("Emeka Obi", 5, 15, 70.0, "121/80", 98.0),
];

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = FlowConfig { seed: SEED, ..FlowConfig::default() };
    config.validate()?;
    let clock = ManualClock::from_unix_secs(SHIFT_START);

    println!("=== shift: er_flow patient-flow core ===");
    println!("Arrivals: {}  |  Seed: {SEED}", ARRIVALS.len());
    println!();

    // 1. Floor plan and resources.
    let mut resources = build_floor(config.resources.clone())?;
    println!(
        "Floor: {} vertices, {} rooms available",
        resources.graph().vertex_count(),
        resources.available(ResourceKind::Room).len()
    );

    // 2. Triage every arrival.
    let mut triage = TriageScheduler::with_clock(config.triage.clone(), &clock);
    let mut directory = InMemoryDirectory::new();
    let mut metrics = MetricsTracker::with_clock(&clock);
    for (name, acuity, waited, hr, bp, spo2) in ARRIVALS {
        let acuity = AcuityLevel::try_from(acuity)?;
        let bp: BloodPressure = bp.parse().with_context(|| format!("vitals for {name}"))?;
        let vitals = VitalSigns::new()
            .with_heart_rate(hr)
            .with_blood_pressure(bp)
            .with_oxygen_saturation(spo2);
        let id = triage.enqueue(
            TriageRequest::new(acuity)
                .with_waiting_minutes(waited)
                .with_vitals(vitals),
        );
        metrics.record_arrival(id.clone(), Some(acuity.level()), None)?;
        metrics.record_triage_complete(id.as_str());
        directory.insert(id, name, acuity);
        clock.advance_minutes(3);
    }
    println!("Triage queue depth: {}", triage.queue_depth());

    // Bilal's heart rate settles on reassessment.
    let bilal = PatientId::from("P000002");
    triage.reprioritize(
        bilal.as_str(),
        AcuityLevel::Level2,
        25,
        VitalSigns::new().with_heart_rate(96.0),
    );

    // 3. Move the triaged patients into the waiting room in score order.
    let mut waiting_room = WaitingRoomScheduler::with_clock(config.waiting_room.clone(), &clock);
    while let Some(entry) = triage.dequeue_next() {
        let admission = waiting_room.add(entry.id, entry.priority, &directory)?;
        println!(
            "  {:<14} score {:>6.1}  position {}  est. wait {:>3} min",
            admission.display_name,
            admission.priority_score,
            admission.position,
            admission.estimated_wait_minutes
        );
    }
    clock.advance_minutes(20);

    // Emeka leaves without being seen.
    waiting_room.remove("P000005");
    println!();

    // 4. Lab orders.
    let mut labs = LabQueue::new();
    labs.schedule(LabRequest::new("P000004", "troponin", 10, "dr-ito"))?;
    labs.schedule(LabRequest::new("P000001", "cbc", 4, "dr-okafor"))?;
    labs.schedule(LabRequest::new("P000002", "bmp", 4, "dr-okafor").with_notes("repeat in 6h"))?;

    // 5. Call patients back, assign rooms and providers, record treatment.
    let mut history = TreatmentHistory::with_clock(InMemoryHistoryStore::new(), &clock, config.seed);
    let status = waiting_room.status();
    println!(
        "Waiting room: {} waiting, average wait {} min",
        status.total_waiting, status.average_wait_minutes
    );

    let mut providers = floor::PROVIDERS.iter().cycle();
    while let Some(patient) = waiting_room.next() {
        let Some(room) = resources.available(ResourceKind::Room).into_iter().next() else {
            info!(patient = %patient, "no room free; patient stays in the hallway");
            continue;
        };
        resources.assign_room(room.as_str(), &patient)?;
        if let Some(provider) = providers.next() {
            resources.assign_provider(provider, &patient)?;
            metrics.record_provider_contact(patient.as_str());
            history.record_action(
                &patient,
                NewAction::new(ActionType::StatusChange, *provider).with_notes(format!("roomed in {room}")),
            )?;
        }
        history.record_action(&patient, NewAction::new(ActionType::VitalSignsUpdate, "rn-kaye"))?;
        clock.advance_minutes(10);
    }
    resources.assign_equipment("monitor-1", "trauma-1")?;

    // Dana: a medication entered against the wrong order is undone.
    let dana = PatientId::from("P000004");
    history.record_action(
        &dana,
        NewAction::new(ActionType::MedicationGiven, "rn-kaye")
            .with_notes("epinephrine 1mg")
            .with_details(r#"{"drug":"epinephrine","dose_mg":1,"route":"IV"}"#),
    )?;
    if let Some(undone) = history.undo_last(&dana)? {
        println!("Undid {} ({}) for {dana}", undone.action_id, undone.action_type);
    }

    // 6. Work the lab queue.
    println!();
    println!("Lab queue:");
    while let Some(lab) = labs.next() {
        println!("  {:<10} {:<8} priority {}", lab.test_type, lab.patient_id, lab.priority);
    }

    // 7. Graph analysis.
    println!();
    let route = resources.optimize_staff_path("rn-kaye", "trauma-1");
    println!(
        "rn-kaye -> trauma-1: {}",
        route.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(" -> ")
    );
    let summary = resources.summary();
    println!("Busiest resources ({} vertices):", summary.total_resources);
    for (id, degree) in summary.bottlenecks.iter().take(3) {
        println!("  {id:<14} degree {degree}");
    }

    let visits = metrics.aggregate(24);
    println!();
    println!(
        "Visits (24h): {}  |  avg door-to-provider {} min",
        visits.total_patients,
        visits.avg_door_to_provider_minutes.map_or("-".to_string(), |m| m.to_string())
    );
    for (level, by_level) in metrics.by_esi_level(24) {
        println!("  ESI {}  {:>2} patients", level.level(), by_level.count);
    }

    // 8. Treatment history table.
    println!();
    println!("{:<10} {:<16} {:<20} {:<8}", "Patient", "Action", "Type", "Undone");
    println!("{}", "-".repeat(56));
    for id in ["P000004", "P000002", "P000001", "P000003"] {
        let patient = PatientId::from(id);
        for record in history.full_history(&patient, true) {
            println!(
                "{:<10} {:<16} {:<20} {:<8}",
                record.patient_id,
                record.action_id,
                record.action_type,
                if record.is_undone() { "yes" } else { "no" },
            );
        }
    }

    Ok(())
}
