use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;

/// Current report; 503 unless every service is running so load balancers and
/// deploy gates can use the status code alone
pub async fn list_services(data: web::Data<AppState>) -> impl Responder {
    match data.monitor.run(&data.services).await {
        Ok(report) if report.all_healthy() => HttpResponse::Ok().json(&report),
        Ok(report) => HttpResponse::ServiceUnavailable().json(&report),
        Err(e) => {
            log::error!("Invalid service list: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "error",
                "message": e.to_string()
            }))
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

    struct NoProcesses;

    #[async_trait]
    impl ProcessResolver for NoProcesses {
        async fn resolve(&self, _token: &str) -> Option<u32> {
            None
        }
    }

    fn state_for(ports: &[u16]) -> AppState {
        let services = ports
            .iter()
            .map(|p| ServiceSpec::new(&format!("svc-{}", p), *p, "TCP", "svc"))
            .collect();
        let monitor = ServiceMonitor::new("127.0.0.1", Arc::new(TcpProbe::default()), Arc::new(NoProcesses));
        new_state(services, monitor)
    }

    #[actix_rt::test]
    async fn test_all_running_returns_ok() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&[port])))
                .route("/api/services", web::get().to(list_services)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/services").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["running_count"], 1);
        assert_eq!(body["records"][0]["reachable"], "running");
        assert!(body["records"][0]["pid"].is_null());
    }

    #[actix_rt::test]
    async fn test_stopped_service_returns_unavailable() {
        let open = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let open_port = open.local_addr().unwrap().port();
        let closed_port = {
            let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap().port()
        };

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&[open_port, closed_port])))
                .route("/api/services", web::get().to(list_services)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/services").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["all_healthy"], false);
        assert_eq!(body["records"][1]["reachable"], "stopped");
    }

    #[actix_rt::test]
    async fn test_empty_service_list_is_an_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(&[])))
                .route("/api/services", web::get().to(list_services)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/services").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
