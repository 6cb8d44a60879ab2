//! Job application tracker backend.
//!
//! Uses a spreadsheet, reached through a hosted proxy, as the table of job
//! applications and serves it over HTTP:
//! - `sheets`: the storage seam and its proxy and in-memory implementations.
//! - `repository`: records, row resolution, reads through the cache, writes.
//! - `cache`: the query cache the repository invalidates after each write.
//! - `services`: the actix-web routes.

pub mod cache;
pub mod config;
pub mod error;
pub mod repository;
pub mod services;
pub mod sheets;
pub mod state;
