//! The aggregation query layer: a fixed set of parameterized aggregates over
//! the punch fact table, each taking one [`MetricsFilter`].

pub mod employees;
pub mod hours;

pub use employees::{TopEmployee, count_employees, top_employees};
pub use hours::{HoursMetrics, PtoMetrics, hours_metrics, pto_metrics};

use chrono::NaiveDate;

pub const DEFAULT_TOP_LIMIT: i64 = 10;

/// Filters shared by every aggregate query. `departments: None` means no
/// department restriction; `date: None` means all-time.
#[derive(Debug, Clone, Default)]
pub struct MetricsFilter {
    pub departments: Option<Vec<String>>,
    pub date: Option<NaiveDate>,
}

impl MetricsFilter {
    /// Builds a filter from raw query parameters. An absent department, or
    /// the literal "All"/"all", means unfiltered; anything else is a
    /// comma-separated department list.
    pub fn from_params(department: Option<&str>, date: Option<NaiveDate>) -> Self {
        let departments = department
            .map(str::trim)
            .filter(|raw| !raw.is_empty() && !raw.eq_ignore_ascii_case("all"))
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|names| !names.is_empty());

        Self { departments, date }
    }
}

/// Appends `AND <column> IN (?, ...)` with one placeholder per department.
/// The caller binds the names in the same order.
pub(crate) fn push_department_clause(sql: &mut String, column: &str, departments: &[String]) {
    let placeholders = vec!["?"; departments.len()].join(", ");
    sql.push_str(&format!(" AND {column} IN ({placeholders})"));
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{NaiveDate, NaiveTime};
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::db;

    /// Fixture: Ada (1, Kitchen) 10 worked hours, Bob (2, Front) 25, Cara
    /// (3, Kitchen) 15; PTO punches for Ada (8h on Jan 1) and Bob (4h on
    /// Jan 3).
    pub async fn seeded_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        db::ensure_schema(&pool).await.expect("schema");

        for (id, name) in [(1, "Front"), (2, "Kitchen")] {
            sqlx::query("INSERT INTO departments (id, name) VALUES (?, ?)")
                .bind(id)
                .bind(name)
                .execute(&pool)
                .await
                .expect("department row");
        }

        for (id, first, last, dept) in [
            (1, "Ada", "Lovelace", "Kitchen"),
            (2, "Bob", "Marley", "Front"),
            (3, "Cara", "Diaz", "Kitchen"),
        ] {
            sqlx::query(
                "INSERT INTO employees (id, first_name, last_name, department) VALUES (?, ?, ?, ?)",
            )
            .bind(id)
            .bind(first)
            .bind(last)
            .bind(dept)
            .execute(&pool)
            .await
            .expect("employee row");
        }

        let punches: &[(i64, u32, &str, f64, f64, f64)] = &[
            // (employee, day-of-january, punch_in_type, regular, ot, paid)
            (1, 1, "Clock In", 10.0, 0.0, 10.0),
            (2, 1, "Clock In", 12.0, 3.0, 12.0),
            (2, 2, "Clock In", 10.0, 0.0, 10.0),
            (3, 1, "Clock In", 15.0, 0.0, 15.0),
            (1, 1, "Non-Work", 0.0, 0.0, 8.0),
            (2, 3, "Non-Work", 0.0, 0.0, 4.0),
        ];
        for (employee_id, day, kind, regular, ot, paid) in punches {
            sqlx::query(
                "INSERT INTO punches (employee_id, work_date, punch_in_time, punch_out_time, \
                 punch_in_type, punch_out_type, regular_duration, ot_duration, paid_duration) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(employee_id)
            .bind(NaiveDate::from_ymd_opt(2024, 1, *day).unwrap())
            .bind(Some(NaiveTime::from_hms_opt(8, 0, 0).unwrap()))
            .bind(None::<NaiveTime>)
            .bind(kind)
            .bind(if *kind == "Clock In" { Some("Clock Out") } else { None })
            .bind(regular)
            .bind(ot)
            .bind(paid)
            .execute(&pool)
            .await
            .expect("punch row");
        }

        pool
    }

    pub fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_absent_mean_no_filter() {
        assert!(MetricsFilter::from_params(None, None).departments.is_none());
        assert!(MetricsFilter::from_params(Some("All"), None).departments.is_none());
        assert!(MetricsFilter::from_params(Some("all"), None).departments.is_none());
        assert!(MetricsFilter::from_params(Some("  "), None).departments.is_none());
    }

    #[test]
    fn comma_separated_departments_become_a_set() {
        let filter = MetricsFilter::from_params(Some("Kitchen, Front ,"), None);
        assert_eq!(
            filter.departments,
            Some(vec!["Kitchen".to_string(), "Front".to_string()])
        );
    }
}
