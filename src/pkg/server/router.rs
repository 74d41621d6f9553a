use axum::middleware::from_fn;
use axum::routing::post;
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::auth::{login, login_page, logout, register, register_page};
use super::handlers::probes::{healthz, livez};
use super::handlers::ui::{landing, not_found};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub fn build_routes() -> Result<Router> {
    Ok(routes(AppState::new()?))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/home", get(handlers::jobs::home))
        .route(
            "/add-job",
            get(handlers::jobs::add_job_page).post(handlers::jobs::add_job),
        )
        .route(
            "/edit-job/{id}",
            get(handlers::jobs::edit_job_page).post(handlers::jobs::edit_job),
        )
        .route("/job/{id}", get(handlers::jobs::job_detail))
        .route("/job/{id}/delete", post(handlers::jobs::delete_job))
        .route("/logout", post(logout))
        .layer(from_fn(authn::authenticate))
        .route("/", get(landing))
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use chrono::NaiveDate;
    use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
    use reqwest::redirect::Policy;
    use tracing_test::traced_test;

    use crate::pkg::internal::adaptors::jobs::remote::testing::serve;
    use crate::pkg::internal::adaptors::jobs::spec::{JobApplication, JobStatus};

    use super::*;

    #[derive(Clone, Default)]
    struct Backend {
        jobs: Arc<Mutex<Vec<JobApplication>>>,
        created: Arc<Mutex<Option<serde_json::Value>>>,
        deleted: Arc<Mutex<Vec<i64>>>,
    }

    fn scenario() -> Vec<JobApplication> {
        vec![
            JobApplication {
                id: 1,
                company: "Acme".into(),
                role: "Engineer".into(),
                status: JobStatus::Applied,
                date_applied: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                duties: None,
                requirements: None,
            },
            JobApplication {
                id: 2,
                company: "Globex".into(),
                role: "Analyst".into(),
                status: JobStatus::Interviewed,
                date_applied: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                duties: Some("Forecasting".into()),
                requirements: None,
            },
        ]
    }

    fn backend_router(backend: Backend) -> Router {
        Router::new()
            .route(
                "/jobs",
                get(|State(b): State<Backend>| async move {
                    Json(b.jobs.lock().unwrap().clone())
                })
                .post(
                    |State(b): State<Backend>, Json(body): Json<serde_json::Value>| async move {
                        *b.created.lock().unwrap() = Some(body);
                        StatusCode::CREATED
                    },
                ),
            )
            .route(
                "/jobs/{id}",
                get(|State(b): State<Backend>, Path(id): Path<i64>| async move {
                    let job = b.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned();
                    match job {
                        Some(job) => Json(job).into_response(),
                        None => StatusCode::NOT_FOUND.into_response(),
                    }
                })
                .put(
                    |State(_b): State<Backend>, Path(_id): Path<i64>| async move {
                        StatusCode::OK
                    },
                )
                .delete(
                    |State(b): State<Backend>, Path(id): Path<i64>| async move {
                        b.deleted.lock().unwrap().push(id);
                        b.jobs.lock().unwrap().retain(|j| j.id != id);
                        StatusCode::OK
                    },
                ),
            )
            .with_state(backend)
    }

    async fn spawn_app(backend: Backend) -> String {
        let backend_url = serve(backend_router(backend)).await;
        let state = AppState::from_url(&backend_url).unwrap();
        serve(routes(state)).await
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap()
    }

    fn seeded() -> Backend {
        let backend = Backend::default();
        *backend.jobs.lock().unwrap() = scenario();
        backend
    }

    const MARKER: &str = "_Host_user=ada";

    #[traced_test]
    #[tokio::test]
    async fn protected_view_without_marker_redirects_to_login() {
        let app = spawn_app(seeded()).await;
        let response = client().get(format!("{}/home", app)).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[traced_test]
    #[tokio::test]
    async fn protected_view_with_marker_renders() {
        let app = spawn_app(seeded()).await;
        let response = client()
            .get(format!("{}/home", app))
            .header(COOKIE, MARKER)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body = response.text().await.unwrap();
        assert!(body.contains("Acme"));
        assert!(body.contains("Globex"));
        assert!(body.contains("Welcome back, ada"));
        // interview rate over the full collection
        assert!(body.contains("50%"));
        // delete buttons carry the blocking confirmation prompt
        assert!(body.contains("return confirm("));
    }

    #[traced_test]
    #[tokio::test]
    async fn search_narrows_the_rendered_list() {
        let app = spawn_app(seeded()).await;
        let body = client()
            .get(format!("{}/home?search=eng", app))
            .header(COOKIE, MARKER)
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("Acme"));
        assert!(!body.contains("Globex"));
    }

    #[traced_test]
    #[tokio::test]
    async fn form_submits_redirect_to_the_canonical_address() {
        let app = spawn_app(seeded()).await;
        let response = client()
            .get(format!("{}/home?search=&status=&sort=desc", app))
            .header(COOKIE, MARKER)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/home");
    }

    #[traced_test]
    #[tokio::test]
    async fn unreachable_backend_shows_a_banner_instead_of_failing() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let state = AppState::from_url(&dead).unwrap();
        let app = serve(routes(state)).await;

        let response = client()
            .get(format!("{}/home", app))
            .header(COOKIE, MARKER)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body = response.text().await.unwrap();
        assert!(body.contains("Could not reach the jobs backend"));
    }

    #[traced_test]
    #[tokio::test]
    async fn unmatched_path_renders_the_not_found_view() {
        let app = spawn_app(seeded()).await;
        let response = client().get(format!("{}/nope", app)).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        assert!(response.text().await.unwrap().contains("Page Not Found"));
    }

    #[traced_test]
    #[tokio::test]
    async fn login_sets_the_marker_and_lands_on_home() {
        let app = spawn_app(seeded()).await;
        let response = client()
            .post(format!("{}/login", app))
            .form(&[("username", "ada"), ("password", "pw")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/home");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("_Host_user=ada"));
    }

    #[traced_test]
    #[tokio::test]
    async fn blank_login_re_renders_with_a_message_and_no_marker() {
        let app = spawn_app(seeded()).await;
        let response = client()
            .post(format!("{}/login", app))
            .form(&[("username", ""), ("password", "pw")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());
        assert!(response.text().await.unwrap().contains("Username is required"));
    }

    #[traced_test]
    #[tokio::test]
    async fn registration_lands_on_login_without_a_marker() {
        let app = spawn_app(seeded()).await;
        let response = client()
            .post(format!("{}/register", app))
            .form(&[("username", "ada"), ("password", "pw")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[traced_test]
    #[tokio::test]
    async fn logout_clears_the_marker_and_lands_on_the_landing_page() {
        let app = spawn_app(seeded()).await;
        let response = client()
            .post(format!("{}/logout", app))
            .header(COOKIE, MARKER)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[traced_test]
    #[tokio::test]
    async fn job_detail_renders_optional_sections_when_present() {
        let app = spawn_app(seeded()).await;
        let body = client()
            .get(format!("{}/job/2", app))
            .header(COOKIE, MARKER)
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("Globex"));
        assert!(body.contains("Forecasting"));
    }

    #[traced_test]
    #[tokio::test]
    async fn missing_record_redirects_to_the_not_found_view() {
        let app = spawn_app(seeded()).await;
        let response = client()
            .get(format!("{}/job/99", app))
            .header(COOKIE, MARKER)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/404");
    }

    #[traced_test]
    #[tokio::test]
    async fn invalid_create_never_reaches_the_backend() {
        let backend = seeded();
        let app = spawn_app(backend.clone()).await;
        let response = client()
            .post(format!("{}/add-job", app))
            .header(COOKIE, MARKER)
            .form(&[
                ("company", ""),
                ("role", "Engineer"),
                ("status", "Applied"),
                ("date_applied", "2024-01-10"),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert!(response.text().await.unwrap().contains("Company is required"));
        assert!(backend.created.lock().unwrap().is_none());
    }

    #[traced_test]
    #[tokio::test]
    async fn valid_create_reaches_the_backend_and_redirects_home() {
        let backend = seeded();
        let app = spawn_app(backend.clone()).await;
        let response = client()
            .post(format!("{}/add-job", app))
            .header(COOKIE, MARKER)
            .form(&[
                ("company", "Initech"),
                ("role", "Consultant"),
                ("status", "Applied"),
                ("date_applied", "2024-03-01"),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/home");
        let created = backend.created.lock().unwrap().clone().unwrap();
        assert_eq!(created["company"], "Initech");
        assert_eq!(created["dateApplied"], "2024-03-01");
    }

    #[traced_test]
    #[tokio::test]
    async fn confirmed_delete_removes_exactly_one_record() {
        let backend = seeded();
        let app = spawn_app(backend.clone()).await;
        let response = client()
            .post(format!("{}/job/1/delete?status=Applied", app))
            .header(COOKIE, MARKER)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/home?status=Applied");
        assert_eq!(*backend.deleted.lock().unwrap(), vec![1]);
        assert_eq!(backend.jobs.lock().unwrap().len(), 1);
        assert_eq!(backend.jobs.lock().unwrap()[0].id, 2);
    }

    #[traced_test]
    #[tokio::test]
    async fn delete_is_also_behind_the_guard() {
        let backend = seeded();
        let app = spawn_app(backend.clone()).await;
        let response = client()
            .post(format!("{}/job/1/delete", app))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
        assert!(backend.deleted.lock().unwrap().is_empty());
    }
}
