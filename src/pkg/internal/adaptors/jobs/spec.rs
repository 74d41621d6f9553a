use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Applied,
    Interviewed,
    Rejected,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [
        JobStatus::Applied,
        JobStatus::Interviewed,
        JobStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interviewed => "Interviewed",
            JobStatus::Rejected => "Rejected",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            JobStatus::Applied => "badge-info",
            JobStatus::Interviewed => "badge-warning",
            JobStatus::Rejected => "badge-neutral",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Applied" => Ok(JobStatus::Applied),
            "Interviewed" => Ok(JobStatus::Interviewed),
            "Rejected" => Ok(JobStatus::Rejected),
            other => Err(format!("unknown job status: {}", other)),
        }
    }
}

/// One tracked application, as the backend serves it. Field names on the wire
/// are camelCase; `id` is assigned by the backend and never sent on create.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub status: JobStatus,
    pub date_applied: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duties: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

/// Create payload: everything except the backend-assigned `id`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewJobApplication {
    pub company: String,
    pub role: String,
    pub status: JobStatus,
    pub date_applied: NaiveDate,
}
