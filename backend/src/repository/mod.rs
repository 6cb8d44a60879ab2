//! # Application Repository
//!
//! Treats one sheet of the spreadsheet as a table of job applications.
//!
//! ## Reads
//! The whole sheet is read once, normalized into records (see `normalize`)
//! and cached under a single key. Filtering, lookups and statistics are
//! computed from the cached snapshot on every call and never touch the
//! network while the snapshot is fresh.
//!
//! ## Writes
//! - `create` appends a row.
//! - `update_status` reads the target row and the header row, replaces the
//!   `Status` cell and writes the row back. The read and the write are not
//!   atomic: an edit made elsewhere in between is overwritten.
//! - `update` overwrites the seven known columns of a row in one call.
//! - `delete` removes the row with a structural request, shifting the rows
//!   below it.
//!
//! Every successful write marks the cached snapshot stale, so the next read
//! fetches the sheet again. Failed writes leave the cache alone and are
//! returned to the caller without retrying.
//!
//! Record ids are turned into rows with `RowLocator`. Every fetch records
//! which data row each id was read from, and that index outlives the cached
//! records: updates leave it as is, `create` adds the appended row and
//! `delete` shifts the rows below the removed one. Writes therefore keep
//! hitting the right row when blank rows sit between records, even after
//! the snapshot went stale. Before the first fetch the id is used as the
//! data row directly.

mod normalize;

use std::sync::Arc;

use common::model::application::{Application, NewApplication, STATUS};
use common::model::filter::ApplicationFilter;
use common::model::sheet::BatchUpdateRequest;
use common::model::stats::ApplicationStats;
use log::{debug, error, info};
use tokio::sync::RwLock;

use crate::cache::QueryCache;
use crate::error::TrackerError;
use crate::sheets::{RowLocator, SheetRange, SheetStore};

pub use normalize::{normalize, RowIndex, Snapshot};

/// Cache key of the full application list.
pub const APPLICATIONS_KEY: &str = "applications";

pub struct ApplicationRepository {
    store: Arc<dyn SheetStore>,
    cache: QueryCache<Snapshot>,
    rows: RwLock<Option<RowIndex>>,
    sheet_name: String,
    sheet_id: Option<u32>,
}

impl ApplicationRepository {
    pub fn new(store: Arc<dyn SheetStore>, sheet_name: impl Into<String>, sheet_id: Option<u32>) -> Self {
        ApplicationRepository {
            store,
            cache: QueryCache::new(),
            rows: RwLock::new(None),
            sheet_name: sheet_name.into(),
            sheet_id,
        }
    }

    pub fn backend_tag(&self) -> &'static str {
        self.store.backend_tag()
    }

    /// The cached snapshot, fetching the sheet if there is none or it is stale.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, TrackerError> {
        self.cache
            .get_or_fetch(APPLICATIONS_KEY, || async {
                let values = self
                    .store
                    .get_values(&SheetRange::whole(&self.sheet_name))
                    .await?;
                let snapshot = normalize(values.values);
                *self.rows.write().await = Some(snapshot.rows.clone());
                debug!(
                    "fetched {} applications from {} store",
                    snapshot.len(),
                    self.store.backend_tag()
                );
                Ok::<_, TrackerError>(snapshot)
            })
            .await
    }

    /// Whether the next read will be served from the cache.
    pub async fn is_cached(&self) -> bool {
        self.cache.peek(APPLICATIONS_KEY).await.is_some()
    }

    pub async fn applications(&self) -> Result<Vec<Application>, TrackerError> {
        Ok(self.snapshot().await?.applications.clone())
    }

    pub async fn filtered(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, TrackerError> {
        let snapshot = self.snapshot().await?;
        Ok(filter.apply(&snapshot.applications))
    }

    pub async fn find(&self, id: &str) -> Result<Application, TrackerError> {
        let snapshot = self.snapshot().await?;
        snapshot
            .find(id)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(format!("application {}", id)))
    }

    pub async fn stats(&self) -> Result<ApplicationStats, TrackerError> {
        let snapshot = self.snapshot().await?;
        Ok(ApplicationStats::from_applications(&snapshot.applications))
    }

    pub async fn create(&self, application: NewApplication) -> Result<(), TrackerError> {
        let result = self
            .store
            .append_row(&SheetRange::whole(&self.sheet_name), application.into_row())
            .await;
        if result.is_ok() {
            if let Some(rows) = self.rows.write().await.as_mut() {
                rows.push_appended();
            }
        }
        self.settle("adding application", result).await
    }

    /// Replaces the `Status` cell of one record and returns the record as written.
    pub async fn update_status(&self, id: &str, status: &str) -> Result<Application, TrackerError> {
        let result = self.write_status(id, status).await;
        self.settle("updating status", result).await
    }

    async fn write_status(&self, id: &str, status: &str) -> Result<Application, TrackerError> {
        let row = self.locate(id).await?.a1_row();

        let mut cells = self
            .store
            .get_values(&SheetRange::row_span(&self.sheet_name, row))
            .await?
            .values
            .into_iter()
            .next()
            .ok_or_else(|| TrackerError::NotFound(format!("row {}", row)))?;
        let headers = self
            .store
            .get_values(&SheetRange::header(&self.sheet_name))
            .await?
            .values
            .into_iter()
            .next()
            .unwrap_or_default();

        let column = headers
            .iter()
            .position(|h| h == STATUS)
            .ok_or_else(|| TrackerError::MissingColumn(STATUS.to_string()))?;
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = status.to_string();

        self.store
            .update_row(&SheetRange::row_anchor(&self.sheet_name, row), cells.clone())
            .await?;

        let mut application = Application {
            id: id.to_string(),
            ..Default::default()
        };
        let mut cells = cells.into_iter();
        for header in &headers {
            application.set_field(header, cells.next().unwrap_or_default());
        }
        Ok(application)
    }

    /// Overwrites the seven known columns of the row `application.id` names.
    pub async fn update(&self, application: Application) -> Result<Application, TrackerError> {
        let result = async {
            let row = self.locate(&application.id).await?.a1_row();
            self.store
                .update_row(
                    &SheetRange::row_anchor(&self.sheet_name, row),
                    application.to_row(),
                )
                .await
        }
        .await;
        self.settle("updating application", result).await?;
        Ok(application)
    }

    pub async fn delete(&self, id: &str) -> Result<(), TrackerError> {
        let result = async {
            let start = self.locate(id).await?.grid_index();
            let request = BatchUpdateRequest::delete_rows(self.sheet_id, start, start + 1);
            debug!("deleting grid row {} for application {}", start, id);
            self.store.batch_update(&request).await?;
            if let Some(rows) = self.rows.write().await.as_mut() {
                rows.remove(id);
            }
            Ok::<_, TrackerError>(())
        }
        .await;
        self.settle("deleting application", result).await
    }

    async fn locate(&self, id: &str) -> Result<RowLocator, TrackerError> {
        let positional = RowLocator::from_id(id)?;
        match self.rows.read().await.as_ref() {
            Some(rows) => rows
                .data_row(id)
                .map(RowLocator::new)
                .ok_or_else(|| TrackerError::NotFound(format!("application {}", id))),
            None => Ok(positional),
        }
    }

    async fn settle<T>(&self, action: &str, result: Result<T, TrackerError>) -> Result<T, TrackerError> {
        match result {
            Ok(value) => {
                self.cache.invalidate(APPLICATIONS_KEY).await;
                info!("{} succeeded; application list marked stale", action);
                Ok(value)
            }
            Err(e) => {
                error!("Error {}: {}", action, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::memory::MemorySheetStore;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn header() -> Vec<String> {
        row(&[
            "Company Name",
            "Job Title",
            "Type",
            "Location",
            "From",
            "Application Date",
            "Status",
        ])
    }

    fn acme() -> Vec<String> {
        row(&["Acme", "Engineer", "Full-time", "Remote", "LinkedIn", "01-02-2024", "Pending"])
    }

    fn repo(rows: Vec<Vec<String>>) -> (Arc<MemorySheetStore>, ApplicationRepository) {
        let store = Arc::new(MemorySheetStore::with_rows(rows));
        let repo = ApplicationRepository::new(store.clone(), "Sheet1", None);
        (store, repo)
    }

    fn new_application(company: &str) -> NewApplication {
        NewApplication::from([
            company.to_string(),
            "Engineer".to_string(),
            "Full-time".to_string(),
            "Remote".to_string(),
            "Referral".to_string(),
            "2024-03-01".to_string(),
            "Pending".to_string(),
        ])
    }

    #[tokio::test]
    async fn fetch_then_delete_leaves_nothing() {
        let (store, repo) = repo(vec![header(), acme()]);

        let apps = repo.applications().await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].id, "0");
        assert_eq!(apps[0].status, "Pending");

        repo.delete("0").await.unwrap();
        assert!(repo.applications().await.unwrap().is_empty());
        assert_eq!(store.rows().await, vec![header()]);
    }

    #[tokio::test]
    async fn reads_are_cached_until_a_write() {
        let (store, repo) = repo(vec![header(), acme()]);
        repo.applications().await.unwrap();
        repo.filtered(&ApplicationFilter::new("acme", vec![])).await.unwrap();
        repo.stats().await.unwrap();
        assert_eq!(store.reads(), 1);
        assert!(repo.is_cached().await);

        repo.create(new_application("Globex")).await.unwrap();
        assert!(!repo.is_cached().await);
        repo.applications().await.unwrap();
        assert_eq!(store.reads(), 2);
    }

    #[tokio::test]
    async fn created_record_round_trips() {
        let (_store, repo) = repo(vec![header(), acme()]);
        repo.create(new_application("Globex")).await.unwrap();

        let apps = repo.applications().await.unwrap();
        assert_eq!(apps.len(), 2);
        let newest = &apps[0];
        assert_eq!(newest.id, "1");
        assert_eq!(
            newest.to_row(),
            row(&["Globex", "Engineer", "Full-time", "Remote", "Referral", "2024-03-01", "Pending"])
        );
    }

    #[tokio::test]
    async fn full_update_is_idempotent() {
        let (store, repo) = repo(vec![header(), acme()]);
        let mut app = repo.find("0").await.unwrap();
        app.status = "Examined".into();
        app.location = "Berlin".into();

        repo.update(app.clone()).await.unwrap();
        let first = store.rows().await;
        repo.update(app.clone()).await.unwrap();
        assert_eq!(store.rows().await, first);
        assert_eq!(first[1][3], "Berlin");
        assert_eq!(repo.find("0").await.unwrap(), app);
    }

    #[tokio::test]
    async fn full_update_does_not_read_first() {
        let (store, repo) = repo(vec![header(), acme()]);
        let mut app = Application {
            id: "0".into(),
            ..Default::default()
        };
        app.set_field("Company Name", "Acme Corp".into());
        repo.update(app).await.unwrap();
        assert_eq!(store.reads(), 0);
        assert_eq!(store.rows().await[1][0], "Acme Corp");
    }

    #[tokio::test]
    async fn status_update_rewrites_only_the_status_cell() {
        let (store, repo) = repo(vec![header(), acme(), row(&["Globex", "Analyst"])]);
        let updated = repo.update_status("1", "Approved").await.unwrap();
        assert_eq!(updated.company_name, "Globex");
        assert_eq!(updated.status, "Approved");

        let rows = store.rows().await;
        assert_eq!(rows[1], acme());
        assert_eq!(rows[2], row(&["Globex", "Analyst", "", "", "", "", "Approved"]));
        assert_eq!(repo.find("1").await.unwrap().status, "Approved");
    }

    #[tokio::test]
    async fn status_update_without_status_column_writes_nothing() {
        let (store, repo) = repo(vec![row(&["Company Name", "Job Title"]), row(&["Acme", "Engineer"])]);
        let err = repo.update_status("0", "Approved").await.unwrap_err();
        assert_eq!(err, TrackerError::MissingColumn("Status".into()));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn status_update_of_missing_row_is_not_found() {
        let (store, repo) = repo(vec![header(), acme()]);
        let err = repo.update_status("7", "Approved").await.unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn cached_snapshot_resolves_rows_past_blank_lines() {
        let (store, repo) = repo(vec![header(), acme(), row(&[]), row(&["Globex", "Analyst"])]);
        let apps = repo.applications().await.unwrap();
        assert_eq!(apps[0].id, "1");

        repo.delete("1").await.unwrap();
        // The trailing blank row is left in place but reads omit it.
        assert_eq!(store.rows().await, vec![header(), acme()]);
    }

    fn globex() -> Vec<String> {
        row(&["Globex", "Analyst", "Contract", "Berlin", "Referral", "05-03-2024", "Pending"])
    }

    #[tokio::test]
    async fn repeated_updates_past_a_blank_row_hit_the_same_row() {
        let (store, repo) = repo(vec![header(), acme(), row(&[]), globex()]);
        let mut app = repo.find("1").await.unwrap();
        assert_eq!(app.company_name, "Globex");
        app.status = "Examined".into();

        repo.update(app.clone()).await.unwrap();
        let first = store.rows().await;
        repo.update(app.clone()).await.unwrap();
        assert_eq!(store.rows().await, first);
        assert_eq!(first[2], Vec::<String>::new());
        assert_eq!(first[3][6], "Examined");

        let ids: Vec<_> = repo
            .applications()
            .await
            .unwrap()
            .into_iter()
            .map(|a| (a.id, a.company_name))
            .collect();
        assert_eq!(
            ids,
            vec![("1".to_string(), "Globex".to_string()), ("0".to_string(), "Acme".to_string())]
        );
    }

    #[tokio::test]
    async fn status_update_after_a_write_keeps_its_row() {
        let (store, repo) = repo(vec![header(), acme(), row(&[]), globex()]);
        repo.applications().await.unwrap();

        repo.update_status("1", "Examined").await.unwrap();
        assert!(!repo.is_cached().await);
        let updated = repo.update_status("1", "Approved").await.unwrap();
        assert_eq!(updated.company_name, "Globex");
        assert_eq!(store.rows().await[3][6], "Approved");
        assert_eq!(store.rows().await[2], Vec::<String>::new());
    }

    #[tokio::test]
    async fn created_record_is_writable_before_the_next_fetch() {
        let (store, repo) = repo(vec![header(), acme(), row(&[]), globex()]);
        repo.applications().await.unwrap();
        repo.create(new_application("Initech")).await.unwrap();

        let updated = repo.update_status("2", "Rejected").await.unwrap();
        assert_eq!(updated.company_name, "Initech");
        let rows = store.rows().await;
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[3], globex());
        assert_eq!(rows[4][6], "Rejected");
    }

    #[tokio::test]
    async fn delete_shifts_the_rows_of_later_records() {
        let (store, repo) = repo(vec![header(), acme(), row(&[]), globex(), row(&["Initech", "Engineer"])]);
        repo.applications().await.unwrap();
        repo.delete("0").await.unwrap();

        let updated = repo.update_status("1", "Approved").await.unwrap();
        assert_eq!(updated.company_name, "Initech");
        let rows = store.rows().await;
        assert_eq!(rows[2], globex());
        assert_eq!(rows[3][0], "Initech");
        assert_eq!(rows[3][6], "Approved");
        assert_eq!(store.reads(), 3);
    }

    #[tokio::test]
    async fn unknown_id_in_fresh_snapshot_is_not_found() {
        let (store, repo) = repo(vec![header(), acme()]);
        repo.applications().await.unwrap();
        assert!(matches!(repo.delete("5").await, Err(TrackerError::NotFound(_))));
        assert!(matches!(repo.delete("x").await, Err(TrackerError::InvalidId(_))));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn failed_write_surfaces_error_and_keeps_cache() {
        let (store, repo) = repo(vec![header(), acme()]);
        repo.applications().await.unwrap();

        let failure = TrackerError::Status {
            status: 400,
            body: "{\"error\":\"Invalid requests[0].deleteDimension\"}".into(),
        };
        store.fail_next(failure.clone()).await;
        assert_eq!(repo.delete("0").await.unwrap_err(), failure);
        assert!(repo.is_cached().await);
        assert_eq!(repo.applications().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_returned() {
        let (store, repo) = repo(vec![header(), acme()]);
        store
            .fail_next(TrackerError::Transport("dns error".into()))
            .await;
        assert!(matches!(
            repo.applications().await,
            Err(TrackerError::Transport(_))
        ));
        assert_eq!(repo.applications().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_sheet_has_no_records() {
        let (_store, repo) = repo(vec![]);
        assert!(repo.applications().await.unwrap().is_empty());
        assert_eq!(repo.stats().await.unwrap().total, 0);
    }
}
