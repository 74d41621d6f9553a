use askama::Template;

use crate::pkg::internal::{
    adaptors::jobs::spec::JobApplication,
    listing::{ListParams, Stats},
};

use super::handlers::jobs::{FormErrors, JobForm};

#[derive(Template)]
#[template(path = "landing.html")]
pub struct Landing {}

#[derive(Template)]
#[template(path = "login.html")]
pub struct Login<'a> {
    pub username: &'a str,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct Register<'a> {
    pub username: &'a str,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct Home<'a> {
    pub username: &'a str,
    pub jobs: Vec<&'a JobApplication>,
    pub stats: Stats,
    pub params: &'a ListParams,
    pub banner: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "add_job.html")]
pub struct AddJob<'a> {
    pub form: &'a JobForm,
    pub errors: &'a FormErrors,
    pub banner: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "edit_job.html")]
pub struct EditJob<'a> {
    pub id: i64,
    pub form: &'a JobForm,
    pub errors: &'a FormErrors,
    pub banner: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "job_detail.html")]
pub struct JobDetail<'a> {
    pub job: &'a JobApplication,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFound {}
