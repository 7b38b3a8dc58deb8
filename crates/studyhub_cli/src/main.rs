//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `studyhub_core` linkage and print the seeded alert list.
//! - Accept an optional TOML config path as the only argument.

use std::path::Path;
use std::process::ExitCode;
use studyhub_core::{init_logging, AppDataStore, CoreConfig};

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match CoreConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => CoreConfig::default(),
    };
    if let Err(err) = init_logging(&config.logging) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    println!("studyhub_core ping={}", studyhub_core::ping());
    println!("studyhub_core version={}", studyhub_core::core_version());

    let mut store = AppDataStore::with_seed_data();
    if let Err(err) = store.set_policy(config.alerts) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    let now = chrono::Local::now().naive_local();
    let summary = store.planner_summary();
    println!(
        "applications={} study_tasks={} completed={} pending_hours={:.1}",
        store.applications().len(),
        summary.total_tasks,
        summary.completed_tasks,
        summary.pending_hours
    );
    for alert in store.alerts(now) {
        println!(
            "[{:?}] {:?} {}: {}",
            alert.priority, alert.kind, alert.title, alert.message
        );
    }
    ExitCode::SUCCESS
}
