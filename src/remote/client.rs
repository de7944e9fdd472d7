// ABOUTME: HTTP client for the job board REST API
// ABOUTME: Issues list/get/create/update/delete requests and normalizes error responses

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Request, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use super::models::{DeleteAck, Job, JobDraft, JobEnvelope, JobId, JobList};
use crate::config::BoardConfig;
use crate::error::{BoardError, Result, GENERIC_ERROR_MESSAGE};
use crate::filters::Filters;

/// The five operations the orchestrator needs from the backend.
#[allow(async_fn_in_trait)]
pub trait JobsApi {
    async fn list_jobs(&self, filters: &Filters) -> Result<JobList>;
    async fn get_job(&self, id: &JobId) -> Result<Job>;
    async fn create_job(&self, draft: &JobDraft) -> Result<Job>;
    async fn update_job(&self, id: &JobId, draft: &JobDraft) -> Result<Job>;
    /// Returns the server's acknowledgement message.
    async fn delete_job(&self, id: &JobId) -> Result<String>;
}

pub struct JobsClient {
    client: Client,
    api_base_url: String,
}

impl JobsClient {
    pub fn new(api_base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BoardError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn jobs_url(&self) -> String {
        format!("{}/jobs", self.api_base_url)
    }

    fn job_url(&self, id: &JobId) -> String {
        format!("{}/jobs/{}", self.api_base_url, id)
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    pub(crate) fn list_request(&self, filters: &Filters) -> Result<Request> {
        let pairs = filters.query_pairs();
        let mut builder = self.request(Method::GET, &self.jobs_url());
        if !pairs.is_empty() {
            builder = builder.query(&pairs);
        }
        builder
            .build()
            .map_err(|e| BoardError::Validation(format!("Invalid list request: {}", e)))
    }

    async fn send(&self, request: Request) -> Result<Response> {
        debug!(method = %request.method(), url = %request.url(), "Sending request");
        Ok(self.client.execute(request).await?)
    }

    pub async fn list_jobs(&self, filters: &Filters) -> Result<JobList> {
        let result: Result<JobList> = async {
            let request = self.list_request(filters)?;
            let response = self.send(request).await?;
            decode(&checked_body(response).await?)
        }
        .await;
        log_failure("Error fetching jobs", result)
    }

    pub async fn get_job(&self, id: &JobId) -> Result<Job> {
        let result: Result<Job> = async {
            let request = self.request(Method::GET, &self.job_url(id)).build()?;
            let response = self.send(request).await?;
            decode(&checked_body(response).await?)
        }
        .await;
        log_failure("Error fetching job", result)
    }

    pub async fn create_job(&self, draft: &JobDraft) -> Result<Job> {
        let result: Result<Job> = async {
            let request = self
                .request(Method::POST, &self.jobs_url())
                .json(draft)
                .build()?;
            let response = self.send(request).await?;
            let envelope: JobEnvelope = decode(&checked_body(response).await?)?;
            Ok(envelope.into_job())
        }
        .await;
        log_failure("Error creating job", result)
    }

    pub async fn update_job(&self, id: &JobId, draft: &JobDraft) -> Result<Job> {
        let result: Result<Job> = async {
            let request = self
                .request(Method::PUT, &self.job_url(id))
                .json(draft)
                .build()?;
            let response = self.send(request).await?;
            let envelope: JobEnvelope = decode(&checked_body(response).await?)?;
            Ok(envelope.into_job())
        }
        .await;
        log_failure("Error updating job", result)
    }

    pub async fn delete_job(&self, id: &JobId) -> Result<String> {
        let result: Result<String> = async {
            let request = self.request(Method::DELETE, &self.job_url(id)).build()?;
            let response = self.send(request).await?;
            let body = checked_body(response).await?;
            // Some servers answer 204 with no body at all.
            let ack: DeleteAck = serde_json::from_slice(&body).unwrap_or_default();
            Ok(ack.message.unwrap_or_else(|| "Job deleted".to_string()))
        }
        .await;
        log_failure("Error deleting job", result)
    }
}

impl JobsApi for JobsClient {
    async fn list_jobs(&self, filters: &Filters) -> Result<JobList> {
        JobsClient::list_jobs(self, filters).await
    }

    async fn get_job(&self, id: &JobId) -> Result<Job> {
        JobsClient::get_job(self, id).await
    }

    async fn create_job(&self, draft: &JobDraft) -> Result<Job> {
        JobsClient::create_job(self, draft).await
    }

    async fn update_job(&self, id: &JobId, draft: &JobDraft) -> Result<Job> {
        JobsClient::update_job(self, id, draft).await
    }

    async fn delete_job(&self, id: &JobId) -> Result<String> {
        JobsClient::delete_job(self, id).await
    }
}

/// Reads the body and turns a non-success status into `BoardError::Api`.
async fn checked_body(response: Response) -> Result<Vec<u8>> {
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    if !status.is_success() {
        return Err(BoardError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| BoardError::Decode(e.to_string()))
}

/// The `error` string of a JSON error body, or the generic fallback.
pub(crate) fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

fn log_failure<T>(what: &str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        error!(error = %err, "{}", what);
    }
    result
}
