use actix_web::{HttpResponse, web};

use crate::api::{department, health, overview};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/overview")
                    .service(web::resource("").route(web::get().to(overview::overview)))
                    .service(web::resource("/employees").route(web::get().to(overview::employees)))
                    .service(
                        web::resource("/hours-metrics")
                            .route(web::get().to(overview::hours_metrics)),
                    )
                    .service(
                        web::resource("/pto-metrics").route(web::get().to(overview::pto_metrics)),
                    ),
            )
            .service(web::resource("/departments").route(web::get().to(department::list_departments)))
            .service(web::resource("/health").route(web::get().to(health::health))),
    );
    cfg.default_service(web::route().to(not_found));
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Route not found" }))
}
