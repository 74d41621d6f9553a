use std::collections::HashMap;
use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, Query, RawQuery, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::{
                mutators::JobMutator,
                remote::ApiError,
                selectors::JobSelector,
                spec::{JobApplication, JobStatus, NewJobApplication},
            },
            listing::{derive_view, ListParams, Stats},
        },
        server::{
            middlewares::authn::Session,
            state::AppState,
            uispec::{AddJob, EditJob, Home, JobDetail},
        },
    },
    prelude::Result,
};

const LIST_FAILED: &str = "Could not reach the jobs backend. Showing an empty list; try again shortly.";
const SAVE_FAILED: &str = "Could not reach the jobs backend. The application was not saved.";

/// Raw form fields for the create/edit views. Values stay strings so a failed
/// submit can re-render exactly what the user typed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct JobForm {
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    pub status: String,
    #[validate(length(min = 1, message = "Date applied is required"))]
    pub date_applied: String,
}

impl JobForm {
    pub fn normalized(mut self) -> Self {
        self.company = self.company.trim().to_string();
        self.role = self.role.trim().to_string();
        self.date_applied = self.date_applied.trim().to_string();
        self
    }

    /// Advisory client-side validation; a failing form never reaches the
    /// network. Re-run on every submit attempt.
    pub fn validated(&self) -> std::result::Result<NewJobApplication, FormErrors> {
        let mut errors = FormErrors::default();
        if let Err(report) = self.validate() {
            errors.extend_from(&report);
        }
        let status = match self.status.parse::<JobStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.add("status", "Status must be Applied, Interviewed or Rejected");
                None
            }
        };
        let date_applied = if self.date_applied.is_empty() {
            // already reported by the length rule
            None
        } else {
            match NaiveDate::parse_from_str(&self.date_applied, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("date_applied", "Date applied must be a valid date");
                    None
                }
            }
        };
        match (status, date_applied) {
            (Some(status), Some(date_applied)) if errors.is_empty() => Ok(NewJobApplication {
                company: self.company.clone(),
                role: self.role.clone(),
                status,
                date_applied,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&JobApplication> for JobForm {
    fn from(job: &JobApplication) -> Self {
        JobForm {
            company: job.company.clone(),
            role: job.role.clone(),
            status: job.status.to_string(),
            date_applied: job.date_applied.to_string(),
        }
    }
}

/// Per-field validation messages; the first message per field wins.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormErrors(HashMap<String, String>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn extend_from(&mut self, report: &validator::ValidationErrors) {
        for (field, errors) in report.field_errors() {
            if let Some(error) = errors.first() {
                let field = field.to_string();
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                self.add(&field, &message);
            }
        }
    }
}

pub async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    // Normalize the address: a form submit carries empty keys, the canonical
    // shareable URL does not.
    if raw_query.unwrap_or_default() != params.query_string() {
        return Ok(Redirect::to(&params.home_url()).into_response());
    }
    let (jobs, banner) = match JobSelector::new(&state.jobs_api).get_all().await {
        Ok(jobs) => (jobs, None),
        Err(err) => {
            tracing::error!("failed to fetch jobs: {}", err);
            (Vec::new(), Some(LIST_FAILED))
        }
    };
    let stats = Stats::compute(&jobs);
    let template = Home {
        username: &session.username,
        jobs: derive_view(&jobs, &params),
        stats,
        params: &params,
        banner,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn add_job_page() -> Result<Html<String>> {
    let form = JobForm {
        status: JobStatus::Applied.to_string(),
        date_applied: Local::now().date_naive().to_string(),
        ..JobForm::default()
    };
    let template = AddJob {
        form: &form,
        errors: &FormErrors::default(),
        banner: None,
    };
    Ok(Html(template.render()?))
}

pub async fn add_job(State(state): State<AppState>, Form(form): Form<JobForm>) -> Result<Response> {
    let form = form.normalized();
    let job = match form.validated() {
        Ok(job) => job,
        Err(errors) => {
            let template = AddJob {
                form: &form,
                errors: &errors,
                banner: None,
            };
            return Ok(Html(template.render()?).into_response());
        }
    };
    match JobMutator::new(&state.jobs_api).create(&job).await {
        Ok(()) => Ok(Redirect::to("/home").into_response()),
        Err(err) => {
            tracing::error!("failed to create job: {}", err);
            let template = AddJob {
                form: &form,
                errors: &FormErrors::default(),
                banner: Some(SAVE_FAILED),
            };
            Ok(Html(template.render()?).into_response())
        }
    }
}

pub async fn edit_job_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let job = match JobSelector::new(&state.jobs_api).get_by_id(id).await {
        Ok(job) => job,
        Err(ApiError::NotFound(_)) => return Ok(Redirect::to("/404").into_response()),
        Err(err) => return Err(err.into()),
    };
    let form = JobForm::from(&job);
    let template = EditJob {
        id,
        form: &form,
        errors: &FormErrors::default(),
        banner: None,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn edit_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<JobForm>,
) -> Result<Response> {
    let form = form.normalized();
    let job = match form.validated() {
        Ok(job) => job,
        Err(errors) => {
            let template = EditJob {
                id,
                form: &form,
                errors: &errors,
                banner: None,
            };
            return Ok(Html(template.render()?).into_response());
        }
    };
    // Full replacement, exactly the submitted fields plus the id.
    let record = JobApplication {
        id,
        company: job.company,
        role: job.role,
        status: job.status,
        date_applied: job.date_applied,
        duties: None,
        requirements: None,
    };
    match JobMutator::new(&state.jobs_api).update(id, &record).await {
        Ok(()) => Ok(Redirect::to("/home").into_response()),
        Err(err) => {
            tracing::error!("failed to update job {}: {}", id, err);
            let template = EditJob {
                id,
                form: &form,
                errors: &FormErrors::default(),
                banner: Some(SAVE_FAILED),
            };
            Ok(Html(template.render()?).into_response())
        }
    }
}

pub async fn job_detail(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let job = match JobSelector::new(&state.jobs_api).get_by_id(id).await {
        Ok(job) => job,
        Err(ApiError::NotFound(_)) => return Ok(Redirect::to("/404").into_response()),
        Err(err) => return Err(err.into()),
    };
    let template = JobDetail { job: &job };
    Ok(Html(template.render()?).into_response())
}

/// The confirmation prompt lives on the delete form; an unconfirmed form is
/// never submitted, so reaching this handler means the user said yes. A
/// failed delete is logged and the user lands back on the unchanged list.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    if let Err(err) = JobMutator::new(&state.jobs_api).delete(id).await {
        tracing::error!("failed to delete job {}: {}", id, err);
    }
    Ok(Redirect::to(&params.home_url()).into_response())
}
