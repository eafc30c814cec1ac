//! HTTP handler functions for the site analysis API.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use site_analysis_dashboard::state::location_name_or_default;
use site_analysis_dashboard::{BundlePayload, FetchError, Report};
use site_analysis_server_models::{
    ApiError, ApiHealth, CoordinateQueryParams, InvalidQueryError, ReportQueryParams,
};
use site_analysis_site_models::{BundleKind, MetricKey};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/metric-cards`
///
/// Returns label, source and unit for each metric in display order.
pub async fn metric_cards() -> HttpResponse {
    HttpResponse::Ok().json(site_analysis_mock::metric_cards())
}

/// `GET /api/metric-cards/{key}`
pub async fn metric_card(key: web::Path<String>) -> HttpResponse {
    match key
        .parse::<MetricKey>()
        .ok()
        .and_then(site_analysis_mock::metric_card)
    {
        Some(card) => HttpResponse::Ok().json(card),
        None => HttpResponse::NotFound().json(ApiError::new(format!("Unknown metric: {key}"))),
    }
}

/// `GET /api/location`
pub async fn location(
    state: web::Data<AppState>,
    params: web::Query<CoordinateQueryParams>,
) -> HttpResponse {
    bundle(&state, *params, BundleKind::Location).await
}

/// `GET /api/metrics`
pub async fn metrics(
    state: web::Data<AppState>,
    params: web::Query<CoordinateQueryParams>,
) -> HttpResponse {
    bundle(&state, *params, BundleKind::Metrics).await
}

/// `GET /api/benchmarks`
pub async fn benchmarks(
    state: web::Data<AppState>,
    params: web::Query<CoordinateQueryParams>,
) -> HttpResponse {
    bundle(&state, *params, BundleKind::Benchmark).await
}

/// `GET /api/risk`
pub async fn risk(
    state: web::Data<AppState>,
    params: web::Query<CoordinateQueryParams>,
) -> HttpResponse {
    bundle(&state, *params, BundleKind::Risk).await
}

/// `GET /api/analysis`
///
/// All four bundles plus the seed, fetched concurrently.
pub async fn analysis(
    state: web::Data<AppState>,
    params: web::Query<CoordinateQueryParams>,
) -> HttpResponse {
    let coordinate = match params.coordinate() {
        Ok(coordinate) => coordinate,
        Err(e) => return bad_request(&e),
    };

    match state.service.fetch_all(coordinate).await {
        Ok(analysis) => HttpResponse::Ok().json(analysis),
        Err(e) => fetch_failed(&e),
    }
}

/// `GET /api/report`
///
/// Plain-text "Full Analysis" report.
pub async fn report(
    state: web::Data<AppState>,
    params: web::Query<ReportQueryParams>,
) -> HttpResponse {
    let coordinate = match params.coordinate() {
        Ok(coordinate) => coordinate,
        Err(e) => return bad_request(&e),
    };
    let name = location_name_or_default(params.name.as_deref());

    match state.service.fetch_all(coordinate).await {
        Ok(analysis) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(Report::from_analysis(name, &analysis, Utc::now()).to_string()),
        Err(e) => fetch_failed(&e),
    }
}

async fn bundle(state: &AppState, params: CoordinateQueryParams, kind: BundleKind) -> HttpResponse {
    let coordinate = match params.coordinate() {
        Ok(coordinate) => coordinate,
        Err(e) => return bad_request(&e),
    };

    match state.service.fetch(kind, coordinate).await {
        Ok(BundlePayload::Location(bundle)) => HttpResponse::Ok().json(bundle),
        Ok(BundlePayload::Metrics(bundle)) => HttpResponse::Ok().json(bundle),
        Ok(BundlePayload::Benchmark(bundle)) => HttpResponse::Ok().json(bundle),
        Ok(BundlePayload::Risk(bundle)) => HttpResponse::Ok().json(bundle),
        Err(e) => fetch_failed(&e),
    }
}

fn bad_request(e: &InvalidQueryError) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiError::new(e.to_string()))
}

fn fetch_failed(e: &FetchError) -> HttpResponse {
    log::error!("Failed to fetch site data: {e}");
    HttpResponse::InternalServerError().json(ApiError::new(e.user_message()))
}
