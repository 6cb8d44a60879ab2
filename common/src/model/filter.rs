//! Client-side search over an already fetched list of applications.
//!
//! The predicate is a case-insensitive substring match on company name or job
//! title, ANDed with membership in the selected statuses. An empty status
//! selection accepts every status. Nothing here touches the network; callers
//! recompute it on every request.

use crate::model::application::Application;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationFilter {
    pub query: String,
    pub statuses: Vec<String>,
}

impl ApplicationFilter {
    pub fn new(query: impl Into<String>, statuses: Vec<String>) -> Self {
        ApplicationFilter {
            query: query.into(),
            statuses,
        }
    }

    /// Builds a filter from URL parameters. `status` is a comma separated list.
    pub fn from_query(query: Option<&str>, status: Option<&str>) -> Self {
        let statuses = status
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        ApplicationFilter {
            query: query.unwrap_or_default().to_string(),
            statuses,
        }
    }

    pub fn matches(&self, application: &Application) -> bool {
        let needle = self.query.to_lowercase();
        let matches_search = application.company_name.to_lowercase().contains(&needle)
            || application.job_title.to_lowercase().contains(&needle);
        let matches_status =
            self.statuses.is_empty() || self.statuses.iter().any(|s| *s == application.status);
        matches_search && matches_status
    }

    pub fn apply(&self, applications: &[Application]) -> Vec<Application> {
        applications
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect()
    }
}
