//! # Application Statistics Service
//!
//! Serves `GET /api/applications/stats`, the aggregates behind the dashboard:
//! totals and per-status, per-type, per-location and per-month buckets, all
//! computed from the cached list.

use actix_web::{web, HttpResponse, Responder};

use crate::repository::ApplicationRepository;
use crate::services::applications::error_response;

/// `GET /api/applications/stats`
///
/// # Arguments
/// * `repository` - Shared application repository.
///
/// # Returns
/// - `200 OK` with `ApplicationStats` as a JSON payload.
/// - `502 Bad Gateway` when the sheet cannot be read.
pub(crate) async fn process(repository: web::Data<ApplicationRepository>) -> impl Responder {
    match repository.stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response("Failed to compute statistics", &e),
    }
}
