pub mod services;
pub mod metrics;

pub use services::list_services;
pub use metrics::get_metrics;

use actix_web::{HttpResponse, Responder};

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}
