use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use common::model::sheet::{BatchUpdateRequest, SheetRequest, ValueRange};
use tokio::sync::Mutex;

use crate::error::TrackerError;
use crate::sheets::{SheetRange, SheetStore};

/// An in-process sheet that behaves like the proxy as far as the repository
/// can observe: reads drop trailing blank cells and rows, appends land after
/// the last row, overwrites start at column A, and row deletions shift the
/// rows below them up.
#[derive(Default)]
pub struct MemorySheetStore {
    grid: Mutex<Vec<Vec<String>>>,
    fail_next: Mutex<Option<TrackerError>>,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        MemorySheetStore {
            grid: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// Loads the grid from a CSV file whose first record is the header row.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self::with_rows(rows))
    }

    /// Makes the next call fail with `error` instead of touching the grid.
    pub async fn fail_next(&self, error: TrackerError) {
        *self.fail_next.lock().await = Some(error);
    }

    /// The grid as a read of the whole sheet would return it.
    pub async fn rows(&self) -> Vec<Vec<String>> {
        trimmed(&self.grid.lock().await)
    }

    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    async fn take_failure(&self) -> Result<(), TrackerError> {
        match self.fail_next.lock().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn trim_row(row: &[String]) -> Vec<String> {
    let len = row
        .iter()
        .rposition(|cell| !cell.is_empty())
        .map_or(0, |i| i + 1);
    row[..len].to_vec()
}

fn trimmed(grid: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = grid.iter().map(|row| trim_row(row)).collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    rows
}

fn bad_request(message: String) -> TrackerError {
    TrackerError::Status {
        status: 400,
        body: serde_json::json!({ "error": { "code": 400, "message": message } }).to_string(),
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn get_values(&self, range: &SheetRange) -> Result<ValueRange, TrackerError> {
        self.take_failure().await?;
        self.reads.fetch_add(1, Ordering::Relaxed);
        let grid = self.grid.lock().await;
        let values = match range.row {
            None => trimmed(&grid),
            Some(row) => grid
                .get(row.saturating_sub(1))
                .map(|r| trim_row(r))
                .filter(|r| !r.is_empty())
                .into_iter()
                .collect(),
        };
        Ok(ValueRange {
            range: Some(range.to_string()),
            values,
        })
    }

    async fn append_row(&self, _range: &SheetRange, row: Vec<String>) -> Result<(), TrackerError> {
        self.take_failure().await?;
        self.writes.fetch_add(1, Ordering::Relaxed);
        let mut grid = self.grid.lock().await;
        while grid.last().is_some_and(|r| trim_row(r).is_empty()) {
            grid.pop();
        }
        grid.push(row);
        Ok(())
    }

    async fn update_row(&self, range: &SheetRange, row: Vec<String>) -> Result<(), TrackerError> {
        self.take_failure().await?;
        let a1_row = match range.row {
            Some(r) if r > 0 => r,
            _ => return Err(bad_request(format!("range {} does not name a row", range))),
        };
        self.writes.fetch_add(1, Ordering::Relaxed);
        let mut grid = self.grid.lock().await;
        if grid.len() < a1_row {
            grid.resize(a1_row, Vec::new());
        }
        let target = &mut grid[a1_row - 1];
        if target.len() < row.len() {
            target.resize(row.len(), String::new());
        }
        for (i, cell) in row.into_iter().enumerate() {
            target[i] = cell;
        }
        Ok(())
    }

    async fn batch_update(&self, request: &BatchUpdateRequest) -> Result<(), TrackerError> {
        self.take_failure().await?;
        self.writes.fetch_add(1, Ordering::Relaxed);
        let mut grid = self.grid.lock().await;
        for req in &request.requests {
            let SheetRequest::DeleteDimension { range } = req;
            if range.start_index >= range.end_index {
                return Err(bad_request(format!(
                    "empty range [{}, {})",
                    range.start_index, range.end_index
                )));
            }
            if range.start_index >= grid.len() {
                return Err(bad_request(format!(
                    "row index {} is out of bounds",
                    range.start_index
                )));
            }
            let end = range.end_index.min(grid.len());
            grid.drain(range.start_index..end);
        }
        Ok(())
    }
}
