use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use super::MetricsFilter;
use crate::model::punch::PunchInType;

/// One leaderboard entry: an employee and their summed worked hours.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct TopEmployee {
    #[schema(example = 42)]
    pub employee_id: i64,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "Kitchen")]
    pub department: String,

    #[schema(example = 168.5)]
    pub total_hours: f64,
}

/// Count of employees matching the department filter. The date filter does
/// not apply here.
pub async fn count_employees(pool: &SqlitePool, filter: &MetricsFilter) -> sqlx::Result<i64> {
    let mut sql = String::from("SELECT COUNT(*) FROM employees WHERE 1 = 1");
    if let Some(departments) = &filter.departments {
        super::push_department_clause(&mut sql, "department", departments);
    }

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    if let Some(departments) = &filter.departments {
        for name in departments {
            query = query.bind(name);
        }
    }
    query.fetch_one(pool).await
}

/// Top `limit` employees by summed worked hours (regular + overtime) over
/// work punches, descending; ties break on employee id ascending so the
/// ordering is deterministic.
pub async fn top_employees(
    pool: &SqlitePool,
    filter: &MetricsFilter,
    limit: i64,
) -> sqlx::Result<Vec<TopEmployee>> {
    let mut sql = String::from(
        "SELECT p.employee_id, e.first_name || ' ' || e.last_name AS name, e.department, \
         CAST(SUM(p.regular_duration + p.ot_duration) AS REAL) AS total_hours \
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
    sql.push_str(" GROUP BY p.employee_id ORDER BY total_hours DESC, p.employee_id ASC LIMIT ?");

    let mut query =
        sqlx::query_as::<_, TopEmployee>(&sql).bind(PunchInType::ClockIn.to_string());
    if let Some(departments) = &filter.departments {
        for name in departments {
            query = query.bind(name);
        }
    }
    if let Some(date) = filter.date {
        query = query.bind(date);
    }
    query = query.bind(limit);

    let mut rows = query.fetch_all(pool).await?;
    for row in &mut rows {
        row.total_hours = super::round2(row.total_hours);
    }
    Ok(rows)
}
