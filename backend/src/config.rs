//! Runtime settings, read from `TRACKER_*` environment variables.
//!
//! | variable                  | default     |
//! |---------------------------|-------------|
//! | `TRACKER_HOST`            | `127.0.0.1` |
//! | `TRACKER_PORT`            | `8080`      |
//! | `TRACKER_STORE`           | `proxy`     |
//! | `TRACKER_PROXY_BASE_URL`  | none        |
//! | `TRACKER_PROXY_TOKEN`     | empty       |
//! | `TRACKER_SHEET_NAME`      | `Sheet1`    |
//! | `TRACKER_SHEET_ID`        | none        |
//! | `TRACKER_SEED_CSV`        | none        |
//!
//! `TRACKER_STORE=memory` keeps the sheet in process, optionally seeded from
//! `TRACKER_SEED_CSV`; useful for running the API without proxy credentials.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment};
use serde::Deserialize;

use crate::error::TrackerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Proxy,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
    pub proxy_base_url: Option<String>,
    pub proxy_token: String,
    pub sheet_name: String,
    /// Grid id of the sheet; only structural deletes need it.
    pub sheet_id: Option<u32>,
    pub seed_csv: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, TrackerError> {
        Self::from_builder(Config::builder().add_source(Environment::with_prefix("TRACKER")))
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, TrackerError> {
        let conf = builder
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("store", "proxy")?
            .set_default("proxy_token", "")?
            .set_default("sheet_name", "Sheet1")?
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        if s.store == StoreKind::Proxy && s.proxy_base_url.as_deref().unwrap_or("").is_empty() {
            return Err(TrackerError::Config(
                "TRACKER_PROXY_BASE_URL is required for the proxy store".into(),
            ));
        }
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_needs_no_proxy() {
        let s = Settings::from_builder(Config::builder().set_override("store", "memory").unwrap())
            .unwrap();
        assert_eq!(s.store, StoreKind::Memory);
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.port, 8080);
        assert_eq!(s.sheet_name, "Sheet1");
        assert_eq!(s.sheet_id, None);
    }

    #[test]
    fn proxy_store_requires_base_url() {
        let err = Settings::from_builder(Config::builder()).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn overrides_take_precedence() {
        let builder = Config::builder()
            .set_override("proxy_base_url", "https://proxy.test/v1/abc/sheet")
            .unwrap()
            .set_override("sheet_name", "Applications")
            .unwrap()
            .set_override("sheet_id", 1196872439i64)
            .unwrap();
        let s = Settings::from_builder(builder).unwrap();
        assert_eq!(s.store, StoreKind::Proxy);
        assert_eq!(s.sheet_name, "Applications");
        assert_eq!(s.sheet_id, Some(1196872439));
    }
}
