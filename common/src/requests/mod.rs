use serde::{Deserialize, Serialize};

/// Query string of `GET /api/applications`.
///
/// `status` is a comma separated list of statuses to keep.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
/// Request payload for the targeted status update endpoint.
pub struct UpdateStatusRequest {
    pub status: String,
}
