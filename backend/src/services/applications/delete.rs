//! # Application Deletion Service
//!
//! Serves `DELETE /api/applications/{id}` with a structural row deletion.
//! Ids are positional, so every record below the removed one is renumbered.

use actix_web::{web, HttpResponse, Responder};

use crate::repository::ApplicationRepository;
use crate::services::applications::error_response;

/// `DELETE /api/applications/{id}`
///
/// Removes the record's row; rows below it move up and get new ids on the
/// next read. A failure body includes the payload the proxy returned.
///
/// # Arguments
/// * `repository` - Shared application repository.
/// * `id` - Record id, extracted from the URL path.
///
/// # Returns
/// - `204 No Content` on success.
/// - `400 Bad Request` or `404 Not Found` for a bad or unknown id.
/// - `502 Bad Gateway` with the proxy's payload when the deletion fails.
pub(crate) async fn process(
    repository: web::Data<ApplicationRepository>,
    id: web::Path<String>,
) -> impl Responder {
    match repository.delete(&id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response("Failed to delete application", &e),
    }
}
