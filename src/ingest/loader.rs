//! Bulk refresh of the store from a time-clock CSV export.
//!
//! One streaming pass over the file collects the deduplicated dimension rows
//! (departments, employees) and the punch facts, then each table is replaced
//! in dependency order. A table's delete + insert runs inside a single
//! transaction, so a failed run leaves that table with its prior contents.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::ingest::normalize::{parse_date, parse_decimal, parse_integer, parse_string, parse_time};
use crate::model::employee::Employee;
use crate::model::punch::NewPunch;

/// SQLite's default bind-variable limit is 999; punches bind 9 values per row.
const INSERT_CHUNK: usize = 100;

/// One raw line of the export, before normalization.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Employee Id")]
    employee_id: Option<String>,
    #[serde(rename = "First Name")]
    first_name: Option<String>,
    #[serde(rename = "Last Name")]
    last_name: Option<String>,
    #[serde(rename = "Department")]
    department: Option<String>,
    #[serde(rename = "Work Date")]
    work_date: Option<String>,
    #[serde(rename = "Punch In Time")]
    punch_in_time: Option<String>,
    #[serde(rename = "Punch Out Time")]
    punch_out_time: Option<String>,
    #[serde(rename = "Punch In Type")]
    punch_in_type: Option<String>,
    #[serde(rename = "Punch Out Type")]
    punch_out_type: Option<String>,
    #[serde(rename = "Regular Duration")]
    regular_duration: Option<String>,
    #[serde(rename = "OT Duration")]
    ot_duration: Option<String>,
    #[serde(rename = "Paid Duration")]
    paid_duration: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub departments: usize,
    pub employees: usize,
    pub punches: usize,
    pub skipped_rows: usize,
}

pub async fn seed_from_csv(pool: &SqlitePool, path: &Path) -> anyhow::Result<SeedSummary> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("cannot open source file {}", path.display()))?;

    let mut department_names: Vec<String> = Vec::new();
    let mut seen_departments: HashSet<String> = HashSet::new();
    let mut employees: Vec<Employee> = Vec::new();
    let mut seen_employees: HashSet<i64> = HashSet::new();
    let mut punches: Vec<NewPunch> = Vec::new();
    let mut skipped_rows = 0usize;

    for result in rdr.deserialize::<RawRow>() {
        let row = result.context("malformed row in source file")?;

        // Departments dedup by name, independent of the employee id.
        if let Some(name) = parse_string(row.department.as_deref()) {
            if seen_departments.insert(name.clone()) {
                department_names.push(name);
            }
        }

        let Some(employee_id) = parse_integer(row.employee_id.as_deref()) else {
            skipped_rows += 1;
            continue;
        };

        // First-seen wins: a repeated id never overwrites the first row's
        // name or department.
        if seen_employees.insert(employee_id) {
            employees.push(Employee {
                id: employee_id,
                first_name: parse_string(row.first_name.as_deref()).unwrap_or_default(),
                last_name: parse_string(row.last_name.as_deref()).unwrap_or_default(),
                department: parse_string(row.department.as_deref()).unwrap_or_default(),
            });
        }

        punches.push(NewPunch {
            employee_id,
            work_date: parse_date(row.work_date.as_deref()).map(|dt| dt.date_naive()),
            punch_in_time: parse_time(row.punch_in_time.as_deref()),
            punch_out_time: parse_time(row.punch_out_time.as_deref()),
            punch_in_type: parse_string(row.punch_in_type.as_deref()),
            punch_out_type: parse_string(row.punch_out_type.as_deref()),
            regular_duration: parse_decimal(row.regular_duration.as_deref()),
            ot_duration: parse_decimal(row.ot_duration.as_deref()),
            paid_duration: parse_decimal(row.paid_duration.as_deref()),
        });
    }

    debug!(
        rows = punches.len() + skipped_rows,
        skipped = skipped_rows,
        "Source file scanned"
    );

    // Load order satisfies the punches -> employees reference.
    replace_departments(pool, &department_names)
        .await
        .context("seeding departments")?;
    info!(count = department_names.len(), "Seeded departments");

    replace_employees(pool, &employees)
        .await
        .context("seeding employees")?;
    info!(count = employees.len(), "Seeded employees");

    replace_punches(pool, &punches)
        .await
        .context("seeding punches")?;
    info!(count = punches.len(), "Seeded punches");

    Ok(SeedSummary {
        departments: department_names.len(),
        employees: employees.len(),
        punches: punches.len(),
        skipped_rows,
    })
}

async fn replace_departments(pool: &SqlitePool, names: &[String]) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM departments").execute(&mut *tx).await?;
    for chunk in names.chunks(INSERT_CHUNK) {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("INSERT INTO departments (name) ");
        qb.push_values(chunk, |mut b, name| {
            b.push_bind(name);
        });
        qb.build().execute(&mut *tx).await?;
    }
    tx.commit().await
}

async fn replace_employees(pool: &SqlitePool, employees: &[Employee]) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM employees").execute(&mut *tx).await?;
    for chunk in employees.chunks(INSERT_CHUNK) {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO employees (id, first_name, last_name, department) ");
        qb.push_values(chunk, |mut b, emp| {
            b.push_bind(emp.id)
                .push_bind(&emp.first_name)
                .push_bind(&emp.last_name)
                .push_bind(&emp.department);
        });
        qb.build().execute(&mut *tx).await?;
    }
    tx.commit().await
}

async fn replace_punches(pool: &SqlitePool, punches: &[NewPunch]) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM punches").execute(&mut *tx).await?;
    for chunk in punches.chunks(INSERT_CHUNK) {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO punches (employee_id, work_date, punch_in_time, punch_out_time, \
             punch_in_type, punch_out_type, regular_duration, ot_duration, paid_duration) ",
        );
        qb.push_values(chunk, |mut b, p| {
            b.push_bind(p.employee_id)
                .push_bind(p.work_date)
                .push_bind(p.punch_in_time)
                .push_bind(p.punch_out_time)
                .push_bind(&p.punch_in_type)
                .push_bind(&p.punch_out_type)
                .push_bind(p.regular_duration)
                .push_bind(p.ot_duration)
                .push_bind(p.paid_duration);
        });
        qb.build().execute(&mut *tx).await?;
    }
    tx.commit().await
}
