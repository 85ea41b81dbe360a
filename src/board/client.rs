use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::models::{Job, RawRecord};
use crate::config::Config;

/// Errors from the job board client
///
/// Note the asymmetry with upstream *error payloads*: a response the board
/// answered with (even `{ "error": ... }`) degrades to zero records, only
/// transport-level failures surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("request to job board failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Body of the list endpoint. An error payload carries no `records` member
/// and therefore decodes as an empty record set.
#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    records: Vec<RawRecord>,
}

/// Client for the Airtable jobs table
pub struct JobBoard {
    client: Client,
    token: String,
    base_url: String,
    table: String,
}

impl JobBoard {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            token: config.airtable_api_token.clone(),
            base_url: config.airtable_base_url.clone(),
            table: config.airtable_table.clone(),
        }
    }

    /// Fetch the full job set, newest first
    ///
    /// Malformed records are dropped with a log entry; an upstream error
    /// response yields an empty set rather than an error, so a transient
    /// provider outage never aborts a run.
    pub async fn fetch_jobs(&self) -> Result<Vec<Job>, BoardError> {
        let url = format!("{}/{}", self.base_url, self.table);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("sort[0][field]", "createdTime"),
                ("sort[0][direction]", "desc"),
            ])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Job board returned {}: {}; treating as no records",
                status, body
            );
            return Ok(Vec::new());
        }

        let body: ListResponse = response.json().await?;
        let total = body.records.len();
        let jobs: Vec<Job> = body.records.into_iter().filter_map(Job::from_record).collect();
        if jobs.len() < total {
            warn!("Dropped {} malformed records", total - jobs.len());
        }

        debug!("Fetched {} jobs from the job board", jobs.len());
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn board_for(server: &MockServer) -> JobBoard {
        JobBoard {
            client: Client::new(),
            token: "at-token".to_string(),
            base_url: server.uri(),
            table: "Jobs".to_string(),
        }
    }

    #[tokio::test]
    async fn fetches_and_decodes_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Jobs"))
            .and(bearer_token("at-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    {
                        "id": "rec1",
                        "createdTime": "2026-08-29T09:30:00.000Z",
                        "fields": {
                            "Title": "Rust Engineer",
                            "Salary": "£60k",
                            "Location": "Norwich",
                            "LocationType": ["Remote"],
                            "Url": "https://example.com/apply",
                        }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let jobs = board_for(&server).fetch_jobs().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "rec1");
        assert_eq!(jobs[0].title, "Rust Engineer");
    }

    #[tokio::test]
    async fn error_payload_yields_empty_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": { "type": "TABLE_NOT_FOUND" }
            })))
            .mount(&server)
            .await;

        let jobs = board_for(&server).fetch_jobs().await.unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_status_yields_empty_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Jobs"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let jobs = board_for(&server).fetch_jobs().await.unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn malformed_records_are_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    {
                        "id": "rec1",
                        "createdTime": "not a timestamp",
                        "fields": { "Title": "A", "Location": "X", "Url": "u" }
                    },
                    {
                        "id": "rec2",
                        "createdTime": "2026-08-29T09:30:00.000Z",
                        "fields": { "Title": "B", "Location": "Y", "Url": "u" }
                    },
                    {
                        "id": "rec3",
                        "createdTime": "2026-08-29T09:30:00.000Z",
                        "fields": { "Location": "Z" }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let jobs = board_for(&server).fetch_jobs().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "rec2");
    }
}
