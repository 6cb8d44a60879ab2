//! # Status Update Service
//!
//! Serves `PATCH /api/applications/{id}/status`. The repository reads the
//! target row and the header row, swaps the `Status` cell and writes the row
//! back. Edits made to that row between the read and the write are lost.

use actix_web::{web, HttpResponse, Responder};
use common::requests::UpdateStatusRequest;

use crate::repository::ApplicationRepository;
use crate::services::applications::error_response;

/// `PATCH /api/applications/{id}/status`
///
/// Replaces the status cell only. Fails with `422` when the sheet has no
/// `Status` column, in which case nothing is written.
///
/// # Arguments
/// * `repository` - Shared application repository.
/// * `id` - Record id, extracted from the URL path.
/// * `payload` - JSON body carrying the new `status`.
///
/// # Returns
/// - `200 OK` with the updated `Application`.
/// - `404 Not Found` when the row is missing or empty.
/// - `422 Unprocessable Entity` when the header row has no `Status` column.
/// - `502 Bad Gateway` when a read or the write fails.
pub(crate) async fn process(
    repository: web::Data<ApplicationRepository>,
    id: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    match repository.update_status(&id, &payload.status).await {
        Ok(application) => HttpResponse::Ok().json(application),
        Err(e) => error_response("Failed to update status", &e),
    }
}
