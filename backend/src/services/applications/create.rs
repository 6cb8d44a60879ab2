//! # Application Creation Service
//!
//! Serves `POST /api/applications`. The body is a `NewApplication`; its seven
//! fields are written in column order as one appended row, and the cached
//! list is marked stale once the proxy accepts it.

use actix_web::{web, HttpResponse, Responder};
use common::model::application::NewApplication;

use crate::repository::ApplicationRepository;
use crate::services::applications::error_response;

/// `POST /api/applications`
///
/// Appends the record as a new sheet row. `Status` defaults to `Pending`.
/// Answers `201 Created` with an empty body; the new record shows up in the
/// next list read.
///
/// # Arguments
/// * `repository` - Shared application repository.
/// * `payload` - The record to add, as JSON.
///
/// # Returns
/// - `201 Created` on success.
/// - `502 Bad Gateway` with the proxy's message when the append fails.
pub(crate) async fn process(
    repository: web::Data<ApplicationRepository>,
    payload: web::Json<NewApplication>,
) -> impl Responder {
    match repository.create(payload.into_inner()).await {
        Ok(()) => HttpResponse::Created().finish(),
        Err(e) => error_response("Failed to add application", &e),
    }
}
