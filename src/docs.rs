use utoipa::OpenApi;

use crate::metrics::TopEmployee;
use crate::model::department::Department;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Punchboard API",
        version = "1.0.0",
        description = r#"
## Time & Attendance Reporting API

Read-only aggregate metrics over a seeded time-clock export:

- **Overview** — combined dashboard metrics, worked/overtime hours, PTO usage,
  and a top-ten leaderboard, filterable by department and work date
- **Departments** — the department dimension for filter dropdowns
- **Health** — liveness probe

Data is loaded in bulk by the offline `seed` binary; no endpoint mutates state.

Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::overview::overview,
        crate::api::overview::employees,
        crate::api::overview::hours_metrics,
        crate::api::overview::pto_metrics,
        crate::api::department::list_departments,
        crate::api::health::health
    ),
    components(
        schemas(
            Department,
            TopEmployee
        )
    ),
    tags(
        (name = "Overview", description = "Aggregate dashboard metrics"),
        (name = "Departments", description = "Department dimension"),
        (name = "Health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;
