//! # CLI Command Implementations

use crate::api;
use crate::config::ServerConfig;
use registrar_core::{EntityStore, RegistrarError, dashboard_stats, seed_demo};
use std::path::Path;

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server. CLI flags override the config file.
pub async fn cmd_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
    no_seed: bool,
) -> Result<(), RegistrarError> {
    let mut config = ServerConfig::load_or_default(config_path)?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if no_seed {
        config.seed_demo = false;
    }

    let mut store = EntityStore::new();
    if config.seed_demo {
        seed_demo(&mut store);
        tracing::info!(
            students = store.student_count(),
            courses = store.course_count(),
            "Demo dataset loaded"
        );
    }

    println!("Registrar Academic Records Service Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.host);
    println!("  Port:     {}", config.port);
    println!("  Seeded:   {}", config.seed_demo);
    println!();
    println!("Endpoints:  /api/students /api/courses /api/enrollments /api/grades");
    println!("            /api/dashboard/stats /health");
    println!();

    api::run_server(&config.bind_addr(), store).await
}

// =============================================================================
// STATS COMMAND
// =============================================================================

/// Print dashboard statistics for the seeded demo dataset.
///
/// The store is process-local and unpersisted, so outside a running server
/// the demo dataset is the only inspectable state.
pub fn cmd_stats(json: bool) -> Result<(), RegistrarError> {
    let mut store = EntityStore::new();
    seed_demo(&mut store);
    let stats = dashboard_stats(&store);

    if json {
        let rendered = serde_json::to_string_pretty(&stats)
            .map_err(|e| RegistrarError::Serialization(e.to_string()))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Dashboard Statistics (demo dataset)");
    println!();
    println!("  Students:       {}", stats.total_students);
    println!("  Active courses: {}", stats.active_courses);
    println!("  Average grade:  {:.1}", stats.average_grade);
    println!("  Pending grades: {}", stats.pending_grades);
    println!();
    println!("  Grade distribution:");
    for (label, count) in stats
        .grade_distribution
        .labels
        .iter()
        .zip(&stats.grade_distribution.data)
    {
        println!("    {:<14} {}", label, count);
    }
    println!();
    println!("  Top students:");
    for top in &stats.top_students {
        println!("    {:<20} {:.1}", top.name, top.average_grade);
    }

    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Write the seeded demo dataset to a JSON file.
pub fn cmd_export(output: &Path, pretty: bool) -> Result<(), RegistrarError> {
    let mut store = EntityStore::new();
    seed_demo(&mut store);
    let snapshot = store.snapshot();

    let rendered = if pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    }
    .map_err(|e| RegistrarError::Serialization(e.to_string()))?;

    std::fs::write(output, rendered).map_err(|e| {
        RegistrarError::Io(format!("Cannot write '{}': {}", output.display(), e))
    })?;

    println!(
        "Exported {} students, {} courses, {} enrollments, {} grades to {}",
        snapshot.students.len(),
        snapshot.courses.len(),
        snapshot.enrollments.len(),
        snapshot.grades.len(),
        output.display()
    );

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
