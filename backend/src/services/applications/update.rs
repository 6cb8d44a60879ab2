//! # Application Update Service
//!
//! Serves `PUT /api/applications/{id}`. The full record is written over its
//! row in a single call without reading the row first, so sending the same
//! body twice leaves the sheet as it was after the first call.

use actix_web::{web, HttpResponse, Responder};
use common::model::application::Application;

use crate::repository::ApplicationRepository;
use crate::services::applications::error_response;

/// `PUT /api/applications/{id}`
///
/// Overwrites the whole row with the record in the body. The id in the path
/// takes precedence over any `id` in the body.
///
/// # Arguments
/// * `repository` - Shared application repository.
/// * `id` - Record id, extracted from the URL path.
/// * `payload` - The complete record, as JSON.
///
/// # Returns
/// - `200 OK` with the record as written.
/// - `400 Bad Request` when the id is not a row position.
/// - `404 Not Found` when the last read had no record with that id.
/// - `502 Bad Gateway` when the write fails.
pub(crate) async fn process(
    repository: web::Data<ApplicationRepository>,
    id: web::Path<String>,
    payload: web::Json<Application>,
) -> impl Responder {
    let mut application = payload.into_inner();
    application.id = id.into_inner();
    match repository.update(application).await {
        Ok(application) => HttpResponse::Ok().json(application),
        Err(e) => error_response("Failed to update application", &e),
    }
}
