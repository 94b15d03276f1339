use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, warn};

const CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Opens the pool, retrying with a fixed delay so the process can come up
/// before its storage volume does (container startup ordering).
pub async fn connect_with_retry(database_url: &str) -> anyhow::Result<SqlitePool> {
    for attempt in 1..=CONNECT_ATTEMPTS {
        match SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!("Database connected successfully");
                return Ok(pool);
            }
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(
                    attempt,
                    max_attempts = CONNECT_ATTEMPTS,
                    error = %e,
                    "Database connection attempt failed, retrying"
                );
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
    unreachable!("connect loop either returns a pool or the last error")
}

/// Creates the tables and indexes if they do not exist, in dependency order:
/// departments, employees, punches.
pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS departments (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        "CREATE TABLE IF NOT EXISTS employees (
            id         INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name  TEXT NOT NULL,
            department TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_employees_department ON employees (department)",
        "CREATE TABLE IF NOT EXISTS punches (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id      INTEGER NOT NULL REFERENCES employees (id),
            work_date        TEXT NOT NULL,
            punch_in_time    TEXT,
            punch_out_time   TEXT,
            punch_in_type    TEXT NOT NULL,
            punch_out_type   TEXT,
            regular_duration REAL NOT NULL DEFAULT 0,
            ot_duration      REAL NOT NULL DEFAULT 0,
            paid_duration    REAL NOT NULL DEFAULT 0
        )",
        "CREATE INDEX IF NOT EXISTS idx_punches_employee_id ON punches (employee_id)",
        "CREATE INDEX IF NOT EXISTS idx_punches_work_date ON punches (work_date)",
        "CREATE INDEX IF NOT EXISTS idx_punches_employee_work_date ON punches (employee_id, work_date)",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
