use std::sync::Arc;

use crate::{pkg::internal::adaptors::jobs::remote::JobsApi, prelude::Result};

#[derive(Debug, Clone)]
pub struct AppState {
    pub jobs_api: Arc<JobsApi>,
}

impl AppState {
    pub fn new() -> Result<AppState> {
        Ok(AppState {
            jobs_api: Arc::new(JobsApi::new()?),
        })
    }

    pub fn from_url(base_url: &str) -> Result<AppState> {
        Ok(AppState {
            jobs_api: Arc::new(JobsApi::from_url(base_url)?),
        })
    }
}
