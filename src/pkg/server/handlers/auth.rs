use std::sync::Arc;

use askama::Template;
use axum::{
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    pkg::server::{
        middlewares::authn::{Session, SESSION_COOKIE},
        uispec::{Login, Register},
    },
    prelude::Result,
};

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct CredentialsInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl CredentialsInput {
    fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self
    }

    /// Pseudo-authentication: nothing is checked against any backend, but the
    /// username has to fit into a cookie value to serve as the session marker.
    fn error(&self) -> Option<String> {
        if let Err(report) = self.validate() {
            return Some(first_message(&report));
        }
        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_graphic() && c != ';' && c != ',')
        {
            return Some("Username may only contain visible characters without ';' or ','".into());
        }
        None
    }
}

fn first_message(report: &validator::ValidationErrors) -> String {
    // Keep field order deterministic: username first, then password.
    for field in ["username", "password"] {
        if let Some(errors) = report.field_errors().get(field) {
            if let Some(error) = errors.first() {
                if let Some(message) = &error.message {
                    return message.to_string();
                }
            }
        }
    }
    "Invalid input".to_string()
}

pub async fn login_page() -> Result<Html<String>> {
    let template = Login {
        username: "",
        error: None,
    };
    Ok(Html(template.render()?))
}

pub async fn login(Form(input): Form<CredentialsInput>) -> Result<Response> {
    let input = input.normalized();
    if let Some(message) = input.error() {
        let template = Login {
            username: &input.username,
            error: Some(message),
        };
        return Ok(Html(template.render()?).into_response());
    }
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&format!("{}={}; Path=/", SESSION_COOKIE, &input.username))?,
    );
    tracing::info!("user {} logged in", &input.username);
    Ok((headers, Redirect::to("/home")).into_response())
}

pub async fn register_page() -> Result<Html<String>> {
    let template = Register {
        username: "",
        error: None,
    };
    Ok(Html(template.render()?))
}

/// Registration is a pseudo-flow: no account is created anywhere, and no
/// session marker is set. A valid submission lands on the login view.
pub async fn register(Form(input): Form<CredentialsInput>) -> Result<Response> {
    let input = input.normalized();
    if let Some(message) = input.error() {
        let template = Register {
            username: &input.username,
            error: Some(message),
        };
        return Ok(Html(template.render()?).into_response());
    }
    tracing::info!("user {} registered", &input.username);
    Ok(Redirect::to("/login").into_response())
}

pub async fn logout(Extension(session): Extension<Arc<Session>>) -> Result<Response> {
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&format!("{}=; Path=/; Max-Age=0", SESSION_COOKIE))?,
    );
    tracing::info!("user {} logged out", &session.username);
    Ok((headers, Redirect::to("/")).into_response())
}
