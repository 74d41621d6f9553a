use axum::extract::State;

use crate::{
    pkg::{internal::adaptors::jobs::selectors::JobSelector, server::state::AppState},
    prelude::Result,
};

pub async fn livez() -> Result<()> {
    tracing::debug!("service is live");
    Ok(())
}

pub async fn healthz(State(state): State<AppState>) -> Result<()> {
    JobSelector::new(&state.jobs_api).get_all().await?;
    tracing::debug!("service is healthy");
    Ok(())
}
