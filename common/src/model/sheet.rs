//! Wire types of the spreadsheet proxy.
//!
//! The proxy mirrors the Sheets `values` and `batchUpdate` resources: value
//! ranges are two-dimensional arrays of strings, and structural edits are sent
//! as a list of requests.

use serde::{Deserialize, Serialize};

/// Body of `GET /values/{range}`, and of append/update writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    pub fn from_row(row: Vec<String>) -> Self {
        ValueRange {
            range: None,
            values: vec![row],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<SheetRequest>,
}

impl BatchUpdateRequest {
    /// A request that removes the rows `[start_index, end_index)` (0-based grid indices).
    pub fn delete_rows(sheet_id: Option<u32>, start_index: usize, end_index: usize) -> Self {
        BatchUpdateRequest {
            requests: vec![SheetRequest::DeleteDimension {
                range: DimensionRange {
                    sheet_id,
                    dimension: Dimension::Rows,
                    start_index,
                    end_index,
                },
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetRequest {
    DeleteDimension { range: DimensionRange },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<u32>,
    pub dimension: Dimension,
    pub start_index: usize,
    /// Exclusive.
    pub end_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertDataOption {
    InsertRows,
}

impl InsertDataOption {
    pub fn as_str(self) -> &'static str {
        match self {
            InsertDataOption::InsertRows => "INSERT_ROWS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delete_rows_matches_batch_update_shape() {
        let body = serde_json::to_value(BatchUpdateRequest::delete_rows(None, 1, 2)).unwrap();
        assert_eq!(
            body,
            json!({
                "requests": [{
                    "deleteDimension": {
                        "range": { "dimension": "ROWS", "startIndex": 1, "endIndex": 2 }
                    }
                }]
            })
        );
    }

    #[test]
    fn sheet_id_is_sent_when_known() {
        let body = serde_json::to_value(BatchUpdateRequest::delete_rows(Some(42), 3, 4)).unwrap();
        assert_eq!(body["requests"][0]["deleteDimension"]["range"]["sheetId"], 42);
    }

    #[test]
    fn missing_values_means_no_rows() {
        let range: ValueRange = serde_json::from_value(json!({ "range": "Sheet1!A1:Z1000" })).unwrap();
        assert!(range.values.is_empty());
    }
}
