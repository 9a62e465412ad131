use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use money_burned_core::prelude::*;

fn main() -> Result<()> {
    let parser = CostParser::new();

    let outcome = parser.parse_resource_list(
        "Consultant:1100 per MD; Rental:92/d; Dev:63500/wy; Junior-Dev:55200/wy; Co-Working-Space:35",
    );

    for error in outcome.errors() {
        eprintln!("Skipping entry: {}", error);
    }

    let mut registry = ResourceRegistry::new();
    for resource in outcome.into_resources() {
        registry.add(resource);
    }

    println!("Resources...");
    for resource in registry.iter() {
        println!("  - {}", resource);
    }
    println!("Total burn rate: ${:.2}/h", registry.total_hourly_rate());

    // Replay a recording against fixed timestamps instead of sleeping.
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let mut session = RecordingSession::new(&registry);
    session.start_at(start)?;

    println!("\n--- Simulated recording ---");
    for minutes in [15, 60, 240, 480] {
        let now = start + Duration::minutes(minutes);
        println!(
            "After {:>3} minutes: ${:.2}",
            minutes,
            session.elapsed_cost_at(now)?
        );
    }

    session.stop_at(start + Duration::hours(8))?;
    println!("\n{}", session);

    Ok(())
}
