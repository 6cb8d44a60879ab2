//! HTTP client for the hosted spreadsheet proxy.
//!
//! The proxy exposes one spreadsheet under a base URL of the form
//! `https://{host}/v1/{integration}/{spreadsheet}` and authenticates with a
//! static bearer token. Routes used here:
//!
//! - `GET  {base}/values/{range}`
//! - `POST {base}/values/{range}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS`
//! - `PUT  {base}/values/{range}?valueInputOption=USER_ENTERED`
//! - `POST {base}:batchUpdate`
//!
//! Any non-2xx answer is returned as `TrackerError::Status` with the response
//! body attached, so the caller can show what the service reported.

use async_trait::async_trait;
use common::model::sheet::{BatchUpdateRequest, InsertDataOption, ValueInputOption, ValueRange};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, Url};

use crate::error::TrackerError;
use crate::sheets::{SheetRange, SheetStore};

pub struct ProxySheetStore {
    client: Client,
    base_url: Url,
}

impl ProxySheetStore {
    pub fn new(base_url: &str, token: &str) -> Result<Self, TrackerError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            TrackerError::Config(format!("invalid proxy base url {}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TrackerError::Config(format!(
                "proxy base url cannot carry a path: {}",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !token.is_empty() {
            let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| TrackerError::Config("proxy token is not a valid header".into()))?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(ProxySheetStore { client, base_url })
    }

    /// `{base}/values/{range}` or `{base}/values/{range}:{action}`.
    pub fn values_url(&self, range: &SheetRange, action: Option<&str>) -> Url {
        let segment = match action {
            Some(action) => format!("{}:{}", range, action),
            None => range.to_string(),
        };
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("values").push(&segment);
        }
        url
    }

    pub fn batch_update_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}:batchUpdate", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url
    }
}

async fn check(response: Response) -> Result<Response, TrackerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TrackerError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Logs the range the proxy reports as written, when it reports one.
async fn log_written_range(response: Response) {
    if let Ok(body) = response.json::<serde_json::Value>().await {
        let updated = body
            .pointer("/updates/updatedRange")
            .or_else(|| body.pointer("/updatedRange"))
            .and_then(|v| v.as_str());
        if let Some(range) = updated {
            debug!("proxy wrote {}", range);
        }
    }
}

#[async_trait]
impl SheetStore for ProxySheetStore {
    fn backend_tag(&self) -> &'static str {
        "proxy"
    }

    async fn get_values(&self, range: &SheetRange) -> Result<ValueRange, TrackerError> {
        let url = self.values_url(range, None);
        debug!("GET {}", url);
        let response = check(self.client.get(url).send().await?).await?;
        Ok(response.json::<ValueRange>().await?)
    }

    async fn append_row(&self, range: &SheetRange, row: Vec<String>) -> Result<(), TrackerError> {
        let url = self.values_url(range, Some("append"));
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", ValueInputOption::UserEntered.as_str()),
                ("insertDataOption", InsertDataOption::InsertRows.as_str()),
                ("includeValuesInResponse", "true"),
            ])
            .json(&ValueRange::from_row(row))
            .send()
            .await?;
        log_written_range(check(response).await?).await;
        Ok(())
    }

    async fn update_row(&self, range: &SheetRange, row: Vec<String>) -> Result<(), TrackerError> {
        let url = self.values_url(range, None);
        debug!("PUT {}", url);
        let response = self
            .client
            .put(url)
            .query(&[
                ("valueInputOption", ValueInputOption::UserEntered.as_str()),
                ("includeValuesInResponse", "true"),
            ])
            .json(&ValueRange::from_row(row))
            .send()
            .await?;
        log_written_range(check(response).await?).await;
        Ok(())
    }

    async fn batch_update(&self, request: &BatchUpdateRequest) -> Result<(), TrackerError> {
        let url = self.batch_update_url();
        debug!("POST {} {}", url, serde_json::to_string(request).unwrap_or_default());
        let response = self.client.post(url).json(request).send().await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ProxySheetStore {
        ProxySheetStore::new("https://api.apico.dev/v1/abc123/sheet-id", "secret").unwrap()
    }

    #[test]
    fn builds_values_urls() {
        let store = store();
        assert_eq!(
            store.values_url(&SheetRange::whole("Sheet1"), None).as_str(),
            "https://api.apico.dev/v1/abc123/sheet-id/values/Sheet1"
        );
        assert_eq!(
            store
                .values_url(&SheetRange::row_span("Sheet1", 4), None)
                .as_str(),
            "https://api.apico.dev/v1/abc123/sheet-id/values/Sheet1!A4:Z4"
        );
        assert_eq!(
            store
                .values_url(&SheetRange::whole("Sheet1"), Some("append"))
                .as_str(),
            "https://api.apico.dev/v1/abc123/sheet-id/values/Sheet1:append"
        );
    }

    #[test]
    fn sheet_names_are_percent_encoded() {
        let url = store().values_url(&SheetRange::row_anchor("Job Apps", 2), None);
        assert_eq!(
            url.as_str(),
            "https://api.apico.dev/v1/abc123/sheet-id/values/Job%20Apps!A2"
        );
    }

    #[test]
    fn batch_update_hangs_off_the_spreadsheet() {
        assert_eq!(
            store().batch_update_url().as_str(),
            "https://api.apico.dev/v1/abc123/sheet-id:batchUpdate"
        );
        let trailing = ProxySheetStore::new("https://proxy.test/v1/x/y/", "").unwrap();
        assert_eq!(
            trailing.batch_update_url().as_str(),
            "https://proxy.test/v1/x/y:batchUpdate"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            ProxySheetStore::new("not a url", "t"),
            Err(TrackerError::Config(_))
        ));
        assert!(matches!(
            ProxySheetStore::new("mailto:someone@example.com", "t"),
            Err(TrackerError::Config(_))
        ));
    }
}
