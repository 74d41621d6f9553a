//! HTTP conduit to the external jobs backend.
//!
//! Persistence lives entirely behind the backend's `/jobs` resource; this
//! module only carries requests across. Failures are split into explicit
//! kinds so the view layer can decide what to surface.

use thiserror::Error;

use crate::conf::settings;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("jobs backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("jobs backend returned {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed jobs backend response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("job {0} not found")]
    NotFound(i64),
}

#[derive(Debug, Clone)]
pub struct JobsApi {
    http: reqwest::Client,
    base_url: String,
}

impl JobsApi {
    pub fn new() -> ApiResult<Self> {
        Self::from_url(&settings.jobs_api_url)
    }

    pub fn from_url(base_url: &str) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("jobtrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Transport)?;
        Ok(JobsApi {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    pub(crate) fn job_url(&self, id: i64) -> String {
        format!("{}/jobs/{}", self.base_url, id)
    }
}

pub(crate) fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::Router;

    /// Bind the given router on an ephemeral port and return its base URL.
    pub(crate) async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub backend");
        });
        format!("http://{}", addr)
    }
}
