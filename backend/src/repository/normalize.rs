use common::model::application::Application;

/// Where each record id sits in the sheet.
///
/// Entry `i` is the data row (0-based, below the header) of the record with
/// id `i`. Blank rows between records make the two differ.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowIndex {
    data_rows: Vec<usize>,
}

impl RowIndex {
    pub fn data_row(&self, id: &str) -> Option<usize> {
        let position = id.trim().parse::<usize>().ok()?;
        self.data_rows.get(position).copied()
    }

    /// Records a row appended after the last record.
    pub fn push_appended(&mut self) {
        let next = self.data_rows.last().map_or(0, |row| row + 1);
        self.data_rows.push(next);
    }

    /// Drops the record `id` and shifts the records below it up one row,
    /// the way a row deletion renumbers them. Returns whether `id` existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let position = match id.trim().parse::<usize>() {
            Ok(position) if position < self.data_rows.len() => position,
            _ => return false,
        };
        self.data_rows.remove(position);
        for row in &mut self.data_rows[position..] {
            *row -= 1;
        }
        true
    }
}

/// One read of the sheet, turned into records.
///
/// `applications` is newest first: the last sheet row comes first. Ids are
/// positions among the emitted records in sheet order, so they are only
/// meaningful for this snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub applications: Vec<Application>,
    pub rows: RowIndex,
}

impl Snapshot {
    /// The data row (0-based, below the header) the record `id` was read from.
    pub fn data_row(&self, id: &str) -> Option<usize> {
        self.rows.data_row(id)
    }

    pub fn find(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Turns a raw value range into records.
///
/// The first row holds the headers. Each following row with at least one
/// non-blank cell becomes a record keyed by header, missing trailing cells
/// reading as empty. No headers or no data rows yields an empty snapshot.
pub fn normalize(values: Vec<Vec<String>>) -> Snapshot {
    let mut rows = values.into_iter();
    let headers = match rows.next() {
        Some(headers) if !headers.is_empty() => headers,
        _ => return Snapshot::default(),
    };

    let mut snapshot = Snapshot::default();
    for (data_index, row) in rows.enumerate() {
        if is_blank(&row) {
            continue;
        }
        let mut application = Application {
            id: snapshot.applications.len().to_string(),
            ..Default::default()
        };
        let mut cells = row.into_iter();
        for header in &headers {
            application.set_field(header, cells.next().unwrap_or_default());
        }
        snapshot.rows.data_rows.push(data_index);
        snapshot.applications.push(application);
    }
    snapshot.applications.reverse();
    snapshot
}
