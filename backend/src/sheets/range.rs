use std::fmt::{Display, Formatter};

use crate::error::TrackerError;

/// Number of rows above the first data row.
pub const HEADER_ROWS: usize = 1;

const FIRST_COLUMN: &str = "A";
const LAST_COLUMN: &str = "Z";

/// An A1 reference into one sheet: the whole sheet, one row anchored at
/// column A, or one row spanning columns A through Z.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet: String,
    pub row: Option<usize>,
    pub span: bool,
}

impl SheetRange {
    pub fn whole(sheet: &str) -> Self {
        SheetRange {
            sheet: sheet.to_string(),
            row: None,
            span: false,
        }
    }

    /// `Sheet1!A{row}`: the anchor of a row overwrite.
    pub fn row_anchor(sheet: &str, a1_row: usize) -> Self {
        SheetRange {
            sheet: sheet.to_string(),
            row: Some(a1_row),
            span: false,
        }
    }

    /// `Sheet1!A{row}:Z{row}`: a single row read.
    pub fn row_span(sheet: &str, a1_row: usize) -> Self {
        SheetRange {
            sheet: sheet.to_string(),
            row: Some(a1_row),
            span: true,
        }
    }

    pub fn header(sheet: &str) -> Self {
        Self::row_span(sheet, HEADER_ROWS)
    }
}

impl Display for SheetRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.row, self.span) {
            (None, _) => write!(f, "{}", self.sheet),
            (Some(row), false) => write!(f, "{}!{}{}", self.sheet, FIRST_COLUMN, row),
            (Some(row), true) => write!(
                f,
                "{}!{}{}:{}{}",
                self.sheet, FIRST_COLUMN, row, LAST_COLUMN, row
            ),
        }
    }
}

/// Maps a data row (0-based, counted below the header) to physical addresses.
///
/// Value writes address rows in 1-based A1 notation while structural requests
/// use 0-based grid indices. Both are derived here from `HEADER_ROWS`, so the
/// update and delete paths always agree on which physical row an id names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLocator {
    data_index: usize,
}

impl RowLocator {
    pub fn new(data_index: usize) -> Self {
        RowLocator { data_index }
    }

    /// Parses a record id as a data row position.
    pub fn from_id(id: &str) -> Result<Self, TrackerError> {
        id.trim()
            .parse::<usize>()
            .map(RowLocator::new)
            .map_err(|_| TrackerError::InvalidId(id.to_string()))
    }

    /// 0-based grid index, for `deleteDimension` ranges.
    pub fn grid_index(self) -> usize {
        self.data_index + HEADER_ROWS
    }

    /// 1-based row number, for A1 references.
    pub fn a1_row(self) -> usize {
        self.grid_index() + 1
    }
}
