use askama::Template;
use axum::{http::StatusCode, response::Html};

use crate::{
    pkg::server::uispec::{Landing, NotFound},
    prelude::Result,
};

pub async fn landing() -> Result<Html<String>> {
    Ok(Html(Landing {}.render()?))
}

pub async fn not_found() -> Result<(StatusCode, Html<String>)> {
    Ok((StatusCode::NOT_FOUND, Html(NotFound {}.render()?)))
}
