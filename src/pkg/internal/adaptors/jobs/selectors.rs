use super::remote::{check_status, ApiError, ApiResult, JobsApi};
use super::spec::JobApplication;

pub struct JobSelector<'a> {
    api: &'a JobsApi,
}

impl<'a> JobSelector<'a> {
    pub fn new(api: &'a JobsApi) -> Self {
        JobSelector { api }
    }

    pub async fn get_all(&self) -> ApiResult<Vec<JobApplication>> {
        let response = self
            .api
            .http()
            .get(self.api.jobs_url())
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let response = check_status(response)?;
        response
            .json::<Vec<JobApplication>>()
            .await
            .map_err(ApiError::Decode)
    }

    /// A backend 404 maps to [`ApiError::NotFound`]; any other failure keeps
    /// its own kind so callers can tell an absent record from a dead backend.
    pub async fn get_by_id(&self, id: i64) -> ApiResult<JobApplication> {
        let response = self
            .api
            .http()
            .get(self.api.job_url(id))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        let response = check_status(response)?;
        response
            .json::<JobApplication>()
            .await
            .map_err(ApiError::Decode)
    }
}
