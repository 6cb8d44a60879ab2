//! # Application Listing Service
//!
//! Serves `GET /api/applications`. The `q` and `status` query parameters are
//! turned into an `ApplicationFilter` and applied to the cached list, so a
//! new search never costs a sheet read while the list is fresh.
//!
//! Records come back newest first, in the order the repository keeps them.

use actix_web::{web, HttpResponse, Responder};
use common::model::filter::ApplicationFilter;
use common::requests::ListQuery;

use crate::repository::ApplicationRepository;
use crate::services::applications::error_response;

/// `GET /api/applications?q=..&status=Pending,Approved`
///
/// The filter runs over the cached list on every call.
///
/// # Arguments
/// * `repository` - Shared application repository.
/// * `query` - Optional `q` search text and comma separated `status` values.
///
/// # Returns
/// - `200 OK` with the matching records as a JSON array.
/// - `502 Bad Gateway` when the sheet cannot be read.
pub(crate) async fn process(
    repository: web::Data<ApplicationRepository>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    let filter = ApplicationFilter::from_query(query.q.as_deref(), query.status.as_deref());
    match repository.filtered(&filter).await {
        Ok(applications) => HttpResponse::Ok().json(applications),
        Err(e) => error_response("Failed to fetch applications", &e),
    }
}
