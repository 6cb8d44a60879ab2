use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const COMPANY_NAME: &str = "Company Name";
pub const JOB_TITLE: &str = "Job Title";
pub const TYPE: &str = "Type";
pub const LOCATION: &str = "Location";
pub const FROM: &str = "From";
pub const APPLICATION_DATE: &str = "Application Date";
pub const STATUS: &str = "Status";

/// The seven known sheet headers, in the column order used for writes.
pub const COLUMNS: [&str; 7] = [
    COMPANY_NAME,
    JOB_TITLE,
    TYPE,
    LOCATION,
    FROM,
    APPLICATION_DATE,
    STATUS,
];

/// A single job application, as read from one non-blank sheet row.
///
/// The JSON shape uses the sheet headers as keys so that clients see the same
/// names as the spreadsheet. Columns the sheet carries beyond the seven known
/// ones are kept in `extra` under their header.
///
/// `id` is positional: it is only meaningful within the snapshot it was read
/// from and is recomputed on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub id: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Type")]
    pub job_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "From")]
    pub source: String,
    #[serde(rename = "Application Date")]
    pub application_date: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Application {
    /// Assigns a cell value by its column header.
    pub fn set_field(&mut self, header: &str, value: String) {
        match header {
            COMPANY_NAME => self.company_name = value,
            JOB_TITLE => self.job_title = value,
            TYPE => self.job_type = value,
            LOCATION => self.location = value,
            FROM => self.source = value,
            APPLICATION_DATE => self.application_date = value,
            STATUS => self.status = value,
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }

    /// The seven known values in `COLUMNS` order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.company_name.clone(),
            self.job_title.clone(),
            self.job_type.clone(),
            self.location.clone(),
            self.source.clone(),
            self.application_date.clone(),
            self.status.clone(),
        ]
    }
}

/// Payload for appending a new application row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Type")]
    pub job_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "From")]
    pub source: String,
    #[serde(rename = "Application Date")]
    pub application_date: String,
    #[serde(rename = "Status", default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    ApplicationStatus::Pending.as_str().to_string()
}

impl NewApplication {
    pub fn into_row(self) -> Vec<String> {
        vec![
            self.company_name,
            self.job_title,
            self.job_type,
            self.location,
            self.source,
            self.application_date,
            self.status,
        ]
    }
}

impl From<[String; 7]> for NewApplication {
    fn from(fields: [String; 7]) -> Self {
        let [company_name, job_title, job_type, location, source, application_date, status] =
            fields;
        NewApplication {
            company_name,
            job_title,
            job_type,
            location,
            source,
            application_date,
            status,
        }
    }
}

/// The status values the UI offers.
///
/// Stored statuses are free text; this enum only names the usual ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Approved,
    Rejected,
    Examined,
    Pending,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Examined,
        ApplicationStatus::Pending,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Examined => "Examined",
            ApplicationStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown status: {}", s))
    }
}
