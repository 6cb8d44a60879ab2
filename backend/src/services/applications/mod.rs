//! # Applications Service Module
//!
//! HTTP endpoints over the application repository, grouped under
//! `/api/applications`. Each sub-module holds one handler:
//!
//! - `list`: `GET /` returns the records matching `q` and `status`.
//! - `stats`: `GET /stats` returns the dashboard aggregates.
//! - `get`: `GET /{id}` returns one record.
//! - `create`: `POST /` appends a record.
//! - `update`: `PUT /{id}` overwrites a record.
//! - `update_status`: `PATCH /{id}/status` replaces only the status cell.
//! - `delete`: `DELETE /{id}` removes the record's row.
//!
//! Failures are answered with the error message as a plain-text body.

mod create;
mod delete;
mod get;
mod list;
mod stats;
mod update;
mod update_status;

use actix_web::web::{delete, get, patch, post, put, scope};
use actix_web::{HttpResponse, Scope};
use log::warn;

use crate::error::TrackerError;

const API_PATH: &str = "/api/applications";

/// Configures and returns the Actix scope for the application routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/", get().to(list::process))
        .route("/", post().to(create::process))
        // Registered before `/{id}` so it is not taken for an id.
        .route("/stats", get().to(stats::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(delete::process))
        .route("/{id}/status", patch().to(update_status::process))
}

/// Maps a repository error to a response carrying its message.
pub(crate) fn error_response(context: &str, e: &TrackerError) -> HttpResponse {
    warn!("{}: {}", context, e);
    let body = format!("{}: {}", context, e);
    match e {
        TrackerError::InvalidId(_) => HttpResponse::BadRequest().body(body),
        TrackerError::NotFound(_) => HttpResponse::NotFound().body(body),
        TrackerError::MissingColumn(_) => HttpResponse::UnprocessableEntity().body(body),
        TrackerError::Transport(_) | TrackerError::Status { .. } | TrackerError::Decode(_) => {
            HttpResponse::BadGateway().body(body)
        }
        TrackerError::Config(_) => HttpResponse::InternalServerError().body(body),
    }
}
