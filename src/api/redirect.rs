use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use std::fmt;
use tracing::{error, warn};

use crate::board::{BoardError, Job, JobBoard};

/// Errors surfaced by the redirect route
#[derive(Debug)]
pub enum RedirectError {
    /// The job board could not be reached
    Upstream(BoardError),
}

impl fmt::Display for RedirectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectError::Upstream(e) => write!(f, "Upstream error: {}", e),
        }
    }
}

impl std::error::Error for RedirectError {}

impl ResponseError for RedirectError {
    fn error_response(&self) -> HttpResponse {
        match self {
            RedirectError::Upstream(e) => {
                error!("Redirect lookup failed: {}", e);
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

/// Resolve a looked-up job set and id to the outgoing response
fn redirect_response(jobs: &[Job], id: &str) -> HttpResponse {
    match jobs.iter().find(|job| job.id == id) {
        Some(job) => HttpResponse::SeeOther()
            .insert_header((LOCATION, job.url.clone()))
            .finish(),
        None => {
            warn!("No job with id {}", id);
            HttpResponse::NotFound().body("Not Found")
        }
    }
}

/// GET /jobs/{id}
///
/// Re-fetches the full job set on every request (no caching) and answers
/// with a 303 to the job's external application URL.
async fn redirect_to_job(
    board: web::Data<JobBoard>,
    path: web::Path<String>,
) -> Result<HttpResponse, RedirectError> {
    let id = path.into_inner();
    let jobs = board
        .fetch_jobs()
        .await
        .map_err(RedirectError::Upstream)?;

    Ok(redirect_response(&jobs, &id))
}

async fn method_not_allowed() -> impl Responder {
    HttpResponse::MethodNotAllowed().body("Method not allowed")
}

pub fn redirect_config(config: &mut web::ServiceConfig) {
    config.service(
        web::resource("/jobs/{id}")
            .route(web::get().to(redirect_to_job))
            .route(web::route().to(method_not_allowed)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn board_with_one_job() -> (MockServer, JobBoard) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/Jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{
                    "id": "abc123",
                    "createdTime": "2026-08-29T09:30:00.000Z",
                    "fields": {
                        "Title": "Rust Engineer",
                        "Location": "Norwich",
                        "Url": "https://example.com/apply",
                    }
                }]
            })))
            .mount(&server)
            .await;

        let config = crate::config::Config {
            airtable_api_token: "at-token".to_string(),
            airtable_base_url: server.uri(),
            airtable_table: "Jobs".to_string(),
            discord_api_token: "bot-token".to_string(),
            discord_api_base_url: "http://127.0.0.1:1".to_string(),
            discord_channel: "1234".to_string(),
            discord_log_channel: None,
            public_base_url: "https://example.com".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            recency_window_hours: 24,
            announce_interval_secs: 86400,
            log_dir: "logs".to_string(),
        };
        let board = JobBoard::new(&config);
        (server, board)
    }

    #[actix_web::test]
    async fn known_id_redirects_to_the_application_url() {
        let (_server, board) = board_with_one_job().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(board))
                .configure(redirect_config),
        )
        .await;

        let req = test::TestRequest::get().uri("/jobs/abc123").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let location = resp.headers().get(LOCATION).unwrap();
        assert_eq!(location, "https://example.com/apply");
    }

    #[actix_web::test]
    async fn unknown_id_is_not_found() {
        let (_server, board) = board_with_one_job().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(board))
                .configure(redirect_config),
        )
        .await;

        let req = test::TestRequest::get().uri("/jobs/doesnotexist").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn non_get_is_method_not_allowed() {
        let (_server, board) = board_with_one_job().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(board))
                .configure(redirect_config),
        )
        .await;

        let req = test::TestRequest::post().uri("/jobs/abc123").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
