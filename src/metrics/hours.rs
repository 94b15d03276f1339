use sqlx::SqlitePool;

use super::MetricsFilter;
use crate::model::punch::PunchInType;

#[derive(Debug, PartialEq)]
pub struct HoursMetrics {
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub paid_duration_hours: f64,
    pub avg_workday_length: f64,
}

#[derive(Debug, PartialEq)]
pub struct PtoMetrics {
    pub employee_count: i64,
    pub hours_total: f64,
}

#[derive(sqlx::FromRow)]
struct HoursRow {
    regular: f64,
    overtime: f64,
    paid: f64,
    punches: i64,
}

#[derive(sqlx::FromRow)]
struct PtoRow {
    employee_count: i64,
    hours_total: f64,
}

/// Worked-hours aggregates over work punches ("Clock In"), inner-joined to
/// employees so the department filter can apply. Zero matching punches means
/// all-zero figures, including the average.
pub async fn hours_metrics(
    pool: &SqlitePool,
    filter: &MetricsFilter,
) -> sqlx::Result<HoursMetrics> {
    let mut sql = String::from(
        "SELECT CAST(COALESCE(SUM(p.regular_duration), 0) AS REAL) AS regular, \
         CAST(COALESCE(SUM(p.ot_duration), 0) AS REAL) AS overtime, \
         CAST(COALESCE(SUM(p.paid_duration), 0) AS REAL) AS paid, \
         COUNT(p.id) AS punches \
         FROM punches p \
         INNER JOIN employees e ON e.id = p.employee_id \
         WHERE p.punch_in_type = ?",
    );
    if let Some(departments) = &filter.departments {
        super::push_department_clause(&mut sql, "e.department", departments);
    }
    if filter.date.is_some() {
        sql.push_str(" AND p.work_date = ?");
    }

    let mut query =
        sqlx::query_as::<_, HoursRow>(&sql).bind(PunchInType::ClockIn.to_string());
    if let Some(departments) = &filter.departments {
        for name in departments {
            query = query.bind(name);
        }
    }
    if let Some(date) = filter.date {
        query = query.bind(date);
    }

    let row = query.fetch_one(pool).await?;
    let total = row.regular + row.overtime;
    let avg = if row.punches > 0 {
        total / row.punches as f64
    } else {
        0.0
    };

    Ok(HoursMetrics {
        total_hours: super::round2(total),
        regular_hours: super::round2(row.regular),
        overtime_hours: super::round2(row.overtime),
        paid_duration_hours: super::round2(row.paid),
        avg_workday_length: super::round2(avg),
    })
}

/// PTO aggregates over non-work punches. Without a date filter the totals
/// are all-time; with one they cover that calendar date only.
pub async fn pto_metrics(pool: &SqlitePool, filter: &MetricsFilter) -> sqlx::Result<PtoMetrics> {
    let mut sql = String::from(
        "SELECT COUNT(DISTINCT p.employee_id) AS employee_count, \
         CAST(COALESCE(SUM(p.paid_duration), 0) AS REAL) AS hours_total \
         FROM punches p \
         INNER JOIN employees e ON e.id = p.employee_id \
         WHERE p.punch_in_type = ?",
    );
    if let Some(departments) = &filter.departments {
        super::push_department_clause(&mut sql, "e.department", departments);
    }
    if filter.date.is_some() {
        sql.push_str(" AND p.work_date = ?");
    }

    let mut query = sqlx::query_as::<_, PtoRow>(&sql).bind(PunchInType::NonWork.to_string());
    if let Some(departments) = &filter.departments {
        for name in departments {
            query = query.bind(name);
        }
    }
    if let Some(date) = filter.date {
        query = query.bind(date);
    }

    let row = query.fetch_one(pool).await?;
    Ok(PtoMetrics {
        employee_count: row.employee_count,
        hours_total: super::round2(row.hours_total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testutil::{jan, seeded_pool};

    #[tokio::test]
    async fn sums_worked_hours_across_all_departments() {
        let pool = seeded_pool().await;
        let metrics = hours_metrics(&pool, &MetricsFilter::default()).await.unwrap();

        assert_eq!(
            metrics,
            HoursMetrics {
                total_hours: 50.0,
                regular_hours: 47.0,
                overtime_hours: 3.0,
                paid_duration_hours: 47.0,
                avg_workday_length: 12.5,
            }
        );
    }

    #[tokio::test]
    async fn date_filter_restricts_to_one_calendar_day() {
        let pool = seeded_pool().await;
        let filter = MetricsFilter::from_params(None, Some(jan(1)));
        let metrics = hours_metrics(&pool, &filter).await.unwrap();

        assert_eq!(metrics.regular_hours, 37.0);
        assert_eq!(metrics.overtime_hours, 3.0);
        assert_eq!(metrics.total_hours, 40.0);
        // 40 hours over 3 punches.
        assert_eq!(metrics.avg_workday_length, 13.33);
    }

    #[tokio::test]
    async fn zero_matches_yield_zeroes_not_errors() {
        let pool = seeded_pool().await;
        let filter = MetricsFilter::from_params(Some("Nonexistent"), None);
        let metrics = hours_metrics(&pool, &filter).await.unwrap();

        assert_eq!(
            metrics,
            HoursMetrics {
                total_hours: 0.0,
                regular_hours: 0.0,
                overtime_hours: 0.0,
                paid_duration_hours: 0.0,
                avg_workday_length: 0.0,
            }
        );
    }

    #[tokio::test]
    async fn pto_without_a_date_is_all_time() {
        let pool = seeded_pool().await;
        let metrics = pto_metrics(&pool, &MetricsFilter::default()).await.unwrap();
        assert_eq!(metrics, PtoMetrics { employee_count: 2, hours_total: 12.0 });
    }

    #[tokio::test]
    async fn pto_with_a_date_covers_that_day_only() {
        let pool = seeded_pool().await;
        let filter = MetricsFilter::from_params(None, Some(jan(1)));
        let metrics = pto_metrics(&pool, &filter).await.unwrap();
        assert_eq!(metrics, PtoMetrics { employee_count: 1, hours_total: 8.0 });
    }

    #[tokio::test]
    async fn pto_excluded_department_yields_zeroes() {
        let pool = seeded_pool().await;
        // Ada's 8h PTO on Jan 1 is in Kitchen; filtering to Front must hide it.
        let filter = MetricsFilter::from_params(Some("Front"), Some(jan(1)));
        let metrics = pto_metrics(&pool, &filter).await.unwrap();
        assert_eq!(metrics, PtoMetrics { employee_count: 0, hours_total: 0.0 });
    }
}
