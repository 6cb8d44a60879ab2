//! Access to the spreadsheet that backs the application list.
//!
//! `SheetStore` is the seam between the repository and the storage. Two
//! implementations exist:
//! - `proxy::ProxySheetStore` talks HTTP to the hosted spreadsheet proxy.
//! - `memory::MemorySheetStore` keeps the grid in process, with the same
//!   observable behaviour, for tests and offline runs.

use async_trait::async_trait;
use common::model::sheet::{BatchUpdateRequest, ValueRange};

use crate::error::TrackerError;

pub mod memory;
pub mod proxy;
pub mod range;

pub use range::{RowLocator, SheetRange, HEADER_ROWS};

#[async_trait]
pub trait SheetStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    /// Reads the values in `range`. Trailing blank cells and rows are omitted.
    async fn get_values(&self, range: &SheetRange) -> Result<ValueRange, TrackerError>;

    /// Appends `row` after the last row of the table found at `range`.
    async fn append_row(&self, range: &SheetRange, row: Vec<String>) -> Result<(), TrackerError>;

    /// Overwrites cells starting at the anchor of `range` with `row`.
    async fn update_row(&self, range: &SheetRange, row: Vec<String>) -> Result<(), TrackerError>;

    /// Submits structural edits such as row deletion.
    async fn batch_update(&self, request: &BatchUpdateRequest) -> Result<(), TrackerError>;
}
