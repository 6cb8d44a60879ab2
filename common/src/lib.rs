//! Types shared between the tracker backend and any client that talks to it.
//!
//! - `model`: the application record, its filter and statistics, and the wire
//!   types of the spreadsheet proxy.
//! - `requests`: payloads accepted by the `/api/applications` endpoints.

pub mod model;
pub mod requests;
