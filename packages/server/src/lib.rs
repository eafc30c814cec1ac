#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the site analysis dashboard.
//!
//! Serves the mock location, metrics, benchmark and risk bundles over a
//! small REST API. Each response waits for the same per-bundle latency the
//! dashboard simulates, unless `SIMULATED_LATENCY=off`.

pub mod config;
mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use site_analysis_dashboard::MockDataService;
use site_analysis_server_models::ApiError;

pub use config::{ServerConfig, ServerConfigError};

/// Shared application state.
pub struct AppState {
    /// Simulated backend all handlers read from.
    pub service: Arc<MockDataService>,
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ApiError::new(message)),
        )
        .into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/metric-cards", web::get().to(handlers::metric_cards))
            .route("/metric-cards/{key}", web::get().to(handlers::metric_card))
            .route("/location", web::get().to(handlers::location))
            .route("/metrics", web::get().to(handlers::metrics))
            .route("/benchmarks", web::get().to(handlers::benchmarks))
            .route("/risk", web::get().to(handlers::risk))
            .route("/analysis", web::get().to(handlers::analysis))
            .route("/report", web::get().to(handlers::report)),
    );
}

/// Starts the site analysis API server.
///
/// The caller is responsible for logger setup and for providing the async
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let fetch_config = config.fetch_config();
    log::info!(
        "Simulated latency {}",
        if config.simulated_latency {
            "enabled"
        } else {
            "disabled"
        }
    );

    let state = web::Data::new(AppState {
        service: Arc::new(MockDataService::new(fetch_config)),
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;
    use site_analysis_dashboard::FetchConfig;

    use super::*;

    const NYC: &str = "lng=-74.006&lat=40.7128";

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState {
            service: Arc::new(MockDataService::new(FetchConfig::instant())),
        })
    }

    async fn get_json(uri: &str) -> Value {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_and_read_body_json(&app, req).await
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let body = get_json("/api/health").await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn metric_cards_in_display_order() {
        let body = get_json("/api/metric-cards").await;
        let cards = body.as_array().unwrap();
        assert_eq!(cards.len(), 9);
        assert_eq!(cards[0]["id"], "highway");
        assert_eq!(cards[0]["label"], "Nearest Highway");
        assert_eq!(cards[6]["unit"], "");
    }

    #[actix_web::test]
    async fn metric_card_lookup_by_key() {
        let body = get_json("/api/metric-cards/airport").await;
        assert_eq!(body["label"], "Nearest Airport");
        assert_eq!(body["source"], "OpenRouteService");

        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/metric-cards/parking")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Unknown metric: parking");
    }

    #[actix_web::test]
    async fn metrics_endpoint_uses_wire_names() {
        let body = get_json(&format!("/api/metrics?{NYC}")).await;
        assert_eq!(body["highway"]["value"], "3.3");
        assert_eq!(body["highway"]["status"], "bad");
        assert_eq!(body["income"]["value"], 79_136);
        assert_eq!(body["income"]["status"], "good");
        assert_eq!(body["zoning"]["value"], "Mixed-Use");
    }

    #[actix_web::test]
    async fn benchmarks_and_risk_endpoints() {
        let benchmarks = get_json(&format!("/api/benchmarks?{NYC}")).await;
        assert_eq!(benchmarks["benchmarks"][0]["value"], "$18.15");
        assert_eq!(benchmarks["benchmarks"][0]["marketPercentile"], 88);

        let risk = get_json(&format!("/api/risk?{NYC}")).await;
        assert_eq!(risk["overallScore"], 91);
        assert_eq!(risk["riskCategory"], "Low Risk");
        assert_eq!(risk["risks"][0]["category"], "High");
        assert_eq!(risk["risks"][0]["marketAverage"], 44);
    }

    #[actix_web::test]
    async fn location_endpoint_returns_feature_collections() {
        let body = get_json(&format!("/api/location?{NYC}")).await;
        assert_eq!(body["parcels"]["type"], "FeatureCollection");
        assert_eq!(body["parcels"]["features"].as_array().unwrap().len(), 3);
        assert_eq!(body["riskFactors"]["features"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn analysis_bundles_everything() {
        let body = get_json(&format!("/api/analysis?{NYC}")).await;
        let seed = body["seed"].as_f64().unwrap();
        assert!((seed - 7.068).abs() < 1e-6, "{seed}");
        assert_eq!(body["coordinate"]["longitude"], -74.006);
        assert_eq!(body["risk"]["overallScore"], 91);
        assert_eq!(body["metrics"]["traffic"]["value"], 29_136);
    }

    #[actix_web::test]
    async fn report_is_plain_text() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/report?{NYC}&name=Hudson%20Yards"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );

        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("Location:     Hudson Yards"));
        assert!(text.contains("Overall Risk Score: 91/100 (Low Risk)"));
    }

    #[actix_web::test]
    async fn report_without_name_uses_default() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/report?{NYC}"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("Location:     Selected Location"));
    }

    #[actix_web::test]
    async fn report_keeps_whitespace_names() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/report?{NYC}&name=%20%20"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.lines().any(|line| line == "Location:       "), "{text}");
        assert!(!text.contains("Selected Location"));
    }

    #[actix_web::test]
    async fn missing_params_are_bad_requests() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/metrics?lng=1.0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("lat"));
    }

    #[actix_web::test]
    async fn non_finite_params_are_bad_requests() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/risk?lng=NaN&lat=1.0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            "Invalid lng: NaN (must be a finite number)"
        );
    }
}
