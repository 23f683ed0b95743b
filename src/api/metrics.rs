use actix_web::{web, HttpResponse, Responder};

use crate::metrics::MetricsRegistry;
use crate::state::AppState;

pub async fn get_metrics(data: web::Data<AppState>) -> impl Responder {
    let report = match data.monitor.run(&data.services).await {
        Ok(report) => report,
        Err(e) => {
            log::error!("Invalid service list: {}", e);
            return HttpResponse::InternalServerError().body(e.to_string());
        }
    };

    let rendered = MetricsRegistry::new()
        .map_err(anyhow::Error::from)
        .and_then(|metrics| {
            metrics.record(&report);
            metrics.render()
        });

    match rendered {
        Ok(metrics_text) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(metrics_text),
        Err(e) => {
            log::error!("Failed to render metrics: {}", e);
            HttpResponse::InternalServerError().body("Failed to render metrics")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceSpec;
    use crate::services::{ProcessResolver, ServiceMonitor, TcpProbe};
    use crate::state::new_state;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedPid(u32);

    #[async_trait]
    impl ProcessResolver for FixedPid {
        async fn resolve(&self, _token: &str) -> Option<u32> {
            Some(self.0)
        }
    }

    #[actix_rt::test]
    async fn test_scrape_reports_current_snapshot() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let services = vec![ServiceSpec::new("Game Service", port, "gRPC", "game-service")];
        let monitor = ServiceMonitor::new("127.0.0.1", Arc::new(TcpProbe::default()), Arc::new(FixedPid(55)));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(new_state(services, monitor)))
                .route("/metrics", web::get().to(get_metrics)),
        )
        .await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("services_running 1"));
        assert!(text.contains("pid=\"55\""));
    }
}
