//! Derived view over the fetched job collection.
//!
//! The three query parameters live in the page URL; `derive_view` is a pure
//! projection recomputed on every render, not an incrementally maintained
//! index.

use serde::Deserialize;

use super::adaptors::jobs::spec::{JobApplication, JobStatus};

pub const SORT_ASCENDING: &str = "asc";
pub const SORT_DESCENDING: &str = "desc";

/// Raw query parameters as they appear in the URL. Values stay strings so the
/// rendered form can echo exactly what was asked for; interpretation happens
/// in [`derive_view`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub search: String,
    pub status: String,
    pub sort: String,
}

impl ListParams {
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || !self.status.is_empty()
    }

    pub fn ascending(&self) -> bool {
        self.sort == SORT_ASCENDING
    }

    /// Canonical query string: a key is present only when its value is
    /// non-empty, and `sort` only when it differs from the descending
    /// default. Keeps the list URL bookmarkable without stray empty keys.
    pub fn query_string(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("search", &self.search));
        }
        if !self.status.is_empty() {
            pairs.push(("status", &self.status));
        }
        if !self.sort.is_empty() && self.sort != SORT_DESCENDING {
            pairs.push(("sort", &self.sort));
        }
        serde_urlencoded::to_string(&pairs).unwrap_or_default()
    }

    pub fn home_url(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            "/home".to_string()
        } else {
            format!("/home?{}", query)
        }
    }

    /// Delete form target for one record, carrying the current view's query
    /// string so the redirect lands back on the same derived view.
    pub fn delete_url(&self, id: i64) -> String {
        let query = self.query_string();
        if query.is_empty() {
            format!("/job/{}/delete", id)
        } else {
            format!("/job/{}/delete?{}", id, query)
        }
    }
}

/// Filter then sort. A record survives the filter iff its company or role
/// contains the search term case-insensitively AND the raw status parameter
/// is empty or equal to the record's status literal; an unknown status value
/// therefore matches nothing. Sorting is stable, by application date,
/// latest-first unless `sort=asc`.
pub fn derive_view<'a>(jobs: &'a [JobApplication], params: &ListParams) -> Vec<&'a JobApplication> {
    let needle = params.search.to_lowercase();
    let mut view: Vec<&JobApplication> = jobs
        .iter()
        .filter(|job| {
            let matches_search = job.company.to_lowercase().contains(&needle)
                || job.role.to_lowercase().contains(&needle);
            let matches_status = params.status.is_empty() || job.status.as_str() == params.status;
            matches_search && matches_status
        })
        .collect();
    if params.ascending() {
        view.sort_by(|a, b| a.date_applied.cmp(&b.date_applied));
    } else {
        view.sort_by(|a, b| b.date_applied.cmp(&a.date_applied));
    }
    view
}

/// Summary numbers for the list view, computed over the unfiltered
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub interviewed: usize,
    pub interview_rate: u32,
}

impl Stats {
    pub fn compute(jobs: &[JobApplication]) -> Self {
        let total = jobs.len();
        let interviewed = jobs
            .iter()
            .filter(|job| job.status == JobStatus::Interviewed)
            .count();
        // max(total, 1) keeps the empty collection at 0% instead of dividing
        // by zero.
        let interview_rate = ((interviewed as f64 / total.max(1) as f64) * 100.0).round() as u32;
        Stats {
            total,
            interviewed,
            interview_rate,
        }
    }
}
