use crate::model::application::Application;
use serde::{Deserialize, Serialize};

/// One labelled count in a dashboard breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub value: usize,
}

/// Aggregates shown on the dashboard: distributions by status, type,
/// location and application day.
///
/// Buckets keep the order in which their label was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub by_status: Vec<Bucket>,
    pub by_type: Vec<Bucket>,
    pub by_location: Vec<Bucket>,
    pub by_date: Vec<Bucket>,
}

impl ApplicationStats {
    pub fn from_applications(applications: &[Application]) -> Self {
        let mut stats = ApplicationStats {
            total: applications.len(),
            ..Default::default()
        };
        for app in applications {
            count(&mut stats.by_status, &app.status);
            count(&mut stats.by_type, &app.job_type);
            count(&mut stats.by_location, &app.location);
            count(&mut stats.by_date, &date_label(&app.application_date));
        }
        stats
    }
}

/// `MM/DD` from an `MM/DD/YYYY` date; other formats pass through unchanged.
fn date_label(date: &str) -> String {
    date.split('/').take(2).collect::<Vec<_>>().join("/")
}

fn count(buckets: &mut Vec<Bucket>, label: &str) {
    match buckets.iter_mut().find(|b| b.label == label) {
        Some(bucket) => bucket.value += 1,
        None => buckets.push(Bucket {
            label: label.to_string(),
            value: 1,
        }),
    }
}
