use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;

use crate::model::department::Department;

/// All departments, ordered by name.
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "Department list", body = Vec<Department>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Departments"
)]
pub async fn list_departments(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let result =
        sqlx::query_as::<_, Department>("SELECT id, name FROM departments ORDER BY name ASC")
            .fetch_all(pool.get_ref())
            .await;

    match result {
        Ok(departments) => Ok(HttpResponse::Ok().json(departments)),
        Err(e) => {
            error!(error = %e, "Department list query failed");
            Ok(HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" })))
        }
    }
}
