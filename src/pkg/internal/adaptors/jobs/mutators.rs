use super::remote::{check_status, ApiError, ApiResult, JobsApi};
use super::spec::{JobApplication, NewJobApplication};

pub struct JobMutator<'a> {
    api: &'a JobsApi,
}

impl<'a> JobMutator<'a> {
    pub fn new(api: &'a JobsApi) -> Self {
        JobMutator { api }
    }

    /// The backend assigns the id; the response body is not consumed because
    /// the list view re-fetches on its next visit.
    pub async fn create(&self, job: &NewJobApplication) -> ApiResult<()> {
        let response = self
            .api
            .http()
            .post(self.api.jobs_url())
            .json(job)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(response)?;
        Ok(())
    }

    /// Full replacement of the identified record, id included.
    pub async fn update(&self, id: i64, job: &JobApplication) -> ApiResult<()> {
        let response = self
            .api
            .http()
            .put(self.api.job_url(id))
            .json(job)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(response)?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let response = self
            .api
            .http()
            .delete(self.api.job_url(id))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(response)?;
        Ok(())
    }
}
