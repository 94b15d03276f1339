//! Offline bulk loader: reads the time-clock CSV export and replaces the
//! departments, employees, and punches tables. Not meant to run concurrently
//! with itself; readers mid-run may briefly observe an empty table.

use std::path::Path;
use std::time::Instant;

use dotenvy::dotenv;
use tracing::info;

use punchboard::config::Config;
use punchboard::db;
use punchboard::ingest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt().with_target(false).init();

    let config = Config::from_env();
    let source = std::env::args().nth(1).unwrap_or_else(|| config.seed_file.clone());

    info!(file = %source, "Starting full seed");

    let pool = db::connect_with_retry(&config.database_url).await?;
    db::ensure_schema(&pool).await?;

    let started = Instant::now();
    let summary = ingest::seed_from_csv(&pool, Path::new(&source)).await?;

    info!(
        departments = summary.departments,
        employees = summary.employees,
        punches = summary.punches,
        skipped_rows = summary.skipped_rows,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "All data seeded successfully"
    );

    Ok(())
}
