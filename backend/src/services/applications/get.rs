//! # Application Retrieval Service
//!
//! Serves `GET /api/applications/{id}` for the detail screen. The record is
//! looked up in the cached list; ids are the positions the last read gave.

use actix_web::{web, HttpResponse, Responder};

use crate::repository::ApplicationRepository;
use crate::services::applications::error_response;

/// `GET /api/applications/{id}`: one record of the current list.
///
/// # Arguments
/// * `repository` - Shared application repository.
/// * `id` - Record id, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the `Application` as a JSON payload.
/// - `404 Not Found` when no record has that id.
/// - `502 Bad Gateway` when the sheet cannot be read.
pub(crate) async fn process(
    repository: web::Data<ApplicationRepository>,
    id: web::Path<String>,
) -> impl Responder {
    match repository.find(&id).await {
        Ok(application) => HttpResponse::Ok().json(application),
        Err(e) => error_response("Failed to fetch application", &e),
    }
}
