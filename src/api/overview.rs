use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::metrics::{self, DEFAULT_TOP_LIMIT, MetricsFilter};

#[derive(Debug, Deserialize, ToSchema)]
pub struct OverviewQuery {
    /// "All"/"all"/absent for no filter, otherwise a comma-separated list of
    /// department names.
    pub department: Option<String>,
    pub date: Option<NaiveDate>,
}

impl OverviewQuery {
    fn filter(&self) -> MetricsFilter {
        MetricsFilter::from_params(self.department.as_deref(), self.date)
    }

    fn department_echo(&self) -> String {
        self.department.clone().unwrap_or_else(|| "All".to_string())
    }
}

fn internal_error(context: &str, err: sqlx::Error) -> HttpResponse {
    error!(error = %err, "{context}");
    HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
}

/// Combined dashboard endpoint: everything the overview page needs in one
/// round trip, department- and date-filterable.
#[utoipa::path(
    get,
    path = "/api/overview",
    params(
        ("department" = Option<String>, Query, description = "Department name, comma-separated list, or \"All\""),
        ("date" = Option<String>, Query, description = "Restrict to one work date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Overview metrics", body = Object, example = json!({
            "data": {
                "employee_count": 42,
                "total_hours_worked": 1680.5,
                "average_workday_length": 7.85,
                "pto_employees_count": 3,
                "pto_hours_taken": 24.0,
                "overtime_hours": 12.25,
                "paid_duration_hours": 1650.0,
                "top_employees": []
            },
            "filters": { "department": "All", "date": null }
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Overview"
)]
pub async fn overview(
    pool: web::Data<SqlitePool>,
    query: web::Query<OverviewQuery>,
) -> actix_web::Result<impl Responder> {
    let filter = query.filter();

    let employee_count = match metrics::count_employees(pool.get_ref(), &filter).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("Employee count query failed", e)),
    };
    let hours = match metrics::hours_metrics(pool.get_ref(), &filter).await {
        Ok(m) => m,
        Err(e) => return Ok(internal_error("Hours metrics query failed", e)),
    };
    let pto = match metrics::pto_metrics(pool.get_ref(), &filter).await {
        Ok(m) => m,
        Err(e) => return Ok(internal_error("PTO metrics query failed", e)),
    };
    let top = match metrics::top_employees(pool.get_ref(), &filter, DEFAULT_TOP_LIMIT).await {
        Ok(rows) => rows,
        Err(e) => return Ok(internal_error("Top employees query failed", e)),
    };

    Ok(HttpResponse::Ok().json(json!({
        "data": {
            "employee_count": employee_count,
            "total_hours_worked": hours.total_hours,
            "average_workday_length": hours.avg_workday_length,
            "pto_employees_count": pto.employee_count,
            "pto_hours_taken": pto.hours_total,
            "overtime_hours": hours.overtime_hours,
            "paid_duration_hours": hours.paid_duration_hours,
            "top_employees": top,
        },
        "filters": {
            "department": query.department_echo(),
            "date": query.date,
        }
    })))
}

/// Employee metrics: headcount plus the top-ten leaderboard.
#[utoipa::path(
    get,
    path = "/api/overview/employees",
    params(
        ("department" = Option<String>, Query, description = "Department name, comma-separated list, or \"All\"")
    ),
    responses(
        (status = 200, description = "Employee metrics", body = Object, example = json!({
            "data": { "employee_count": 42, "top_employees": [] },
            "filters": { "department": "All" }
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Overview"
)]
pub async fn employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<OverviewQuery>,
) -> actix_web::Result<impl Responder> {
    let filter = query.filter();

    let employee_count = match metrics::count_employees(pool.get_ref(), &filter).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("Employee count query failed", e)),
    };
    let top = match metrics::top_employees(pool.get_ref(), &filter, DEFAULT_TOP_LIMIT).await {
        Ok(rows) => rows,
        Err(e) => return Ok(internal_error("Top employees query failed", e)),
    };

    Ok(HttpResponse::Ok().json(json!({
        "data": {
            "employee_count": employee_count,
            "top_employees": top,
        },
        "filters": {
            "department": query.department_echo(),
        }
    })))
}

/// Worked-hours metrics, department-filterable.
#[utoipa::path(
    get,
    path = "/api/overview/hours-metrics",
    params(
        ("department" = Option<String>, Query, description = "Department name, comma-separated list, or \"All\"")
    ),
    responses(
        (status = 200, description = "Hours metrics", body = Object, example = json!({
            "data": {
                "total_hours_worked": 1680.5,
                "overtime_hours": 12.25,
                "regular_hours": 1668.25,
                "paid_duration_hours": 1650.0,
                "average_workday_length": 7.85
            },
            "filters": { "department": "All" }
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Overview"
)]
pub async fn hours_metrics(
    pool: web::Data<SqlitePool>,
    query: web::Query<OverviewQuery>,
) -> actix_web::Result<impl Responder> {
    let hours = match metrics::hours_metrics(pool.get_ref(), &query.filter()).await {
        Ok(m) => m,
        Err(e) => return Ok(internal_error("Hours metrics query failed", e)),
    };

    Ok(HttpResponse::Ok().json(json!({
        "data": {
            "total_hours_worked": hours.total_hours,
            "overtime_hours": hours.overtime_hours,
            "regular_hours": hours.regular_hours,
            "paid_duration_hours": hours.paid_duration_hours,
            "average_workday_length": hours.avg_workday_length,
        },
        "filters": {
            "department": query.department_echo(),
        }
    })))
}

/// PTO metrics, department- and date-filterable. Without a date the totals
/// are all-time.
#[utoipa::path(
    get,
    path = "/api/overview/pto-metrics",
    params(
        ("department" = Option<String>, Query, description = "Department name, comma-separated list, or \"All\""),
        ("date" = Option<String>, Query, description = "Restrict to one work date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "PTO metrics", body = Object, example = json!({
            "data": { "pto_employees_count": 3, "pto_hours_taken": 24.0 },
            "filters": { "department": "All", "date": null }
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Overview"
)]
pub async fn pto_metrics(
    pool: web::Data<SqlitePool>,
    query: web::Query<OverviewQuery>,
) -> actix_web::Result<impl Responder> {
    let pto = match metrics::pto_metrics(pool.get_ref(), &query.filter()).await {
        Ok(m) => m,
        Err(e) => return Ok(internal_error("PTO metrics query failed", e)),
    };

    Ok(HttpResponse::Ok().json(json!({
        "data": {
            "pto_employees_count": pto.employee_count,
            "pto_hours_taken": pto.hours_total,
        },
        "filters": {
            "department": query.department_echo(),
            "date": query.date,
        }
    })))
}
