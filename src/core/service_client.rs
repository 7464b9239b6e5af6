// src/core/service_client.rs
//! HTTP client for the job backend - JSON for scrape/summarize, multipart for resumes

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

use super::backend::{ApiError, JobBackend};
use super::resume_validator::ResumeUpload;
use crate::config::AppConfig;
use crate::types::response::ErrorBody;
use crate::types::{
    AnalysisResult, HealthResponse, RawJobRecord, ResumeProfile, SearchCriteria, SummarizeRequest,
};

const SCRAPE_ENDPOINT: &str = "/api/scrape";
const SUMMARIZE_ENDPOINT: &str = "/api/v1/summarize";
const ANALYZE_RESUME_ENDPOINT: &str = "/api/analyze-resume";
const HEALTH_ENDPOINT: &str = "/";

const SCRAPE_FALLBACK: &str = "Failed to fetch jobs";
const SUMMARIZE_FALLBACK: &str = "Failed to analyze job description";
const ANALYZE_RESUME_FALLBACK: &str = "Failed to analyze resume";
const HEALTH_FALLBACK: &str = "Backend health check failed";

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.backend_url, config.timeout_seconds)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Read the body and turn it into `R` or an [`ApiError`]
    async fn read_response<R>(
        response: reqwest::Response,
        endpoint: &'static str,
        fallback: &str,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        info!("Received response with status: {}", status);

        let body = response.text().await?;
        parse_body(status, &body, endpoint, fallback)
    }
}

/// Decode a response body, mapping non-2xx statuses to their `detail` message
pub(crate) fn parse_body<R>(
    status: StatusCode,
    body: &str,
    endpoint: &'static str,
    fallback: &str,
) -> Result<R, ApiError>
where
    R: DeserializeOwned,
{
    if status.is_success() {
        return serde_json::from_str(body).map_err(|source| ApiError::Decode { endpoint, source });
    }

    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail_text())
        .unwrap_or_else(|| fallback.to_string());

    error!("API error ({}) from {}: {}", status, endpoint, detail);
    Err(ApiError::Status { status, detail })
}

#[async_trait]
impl JobBackend for ServiceClient {
    async fn scrape(&self, criteria: &SearchCriteria) -> Result<Vec<RawJobRecord>, ApiError> {
        let url = self.url(SCRAPE_ENDPOINT);
        info!("Making request to: {}", url);
        debug!("Search parameters: {:?}", criteria);

        let response = self.client.post(&url).json(criteria).send().await?;
        Self::read_response(response, SCRAPE_ENDPOINT, SCRAPE_FALLBACK).await
    }

    async fn summarize(&self, request: &SummarizeRequest<'_>) -> Result<AnalysisResult, ApiError> {
        let url = self.url(SUMMARIZE_ENDPOINT);
        info!("Making request to: {}", url);
        debug!(
            "Analysis options: focus_areas={:?} summary_length={} experience_years={:?} required_skills={:?}",
            request.focus_areas, request.summary_length, request.experience_years, request.required_skills
        );

        let response = self.client.post(&url).json(request).send().await?;
        Self::read_response(response, SUMMARIZE_ENDPOINT, SUMMARIZE_FALLBACK).await
    }

    async fn analyze_resume(&self, upload: &ResumeUpload) -> Result<ResumeProfile, ApiError> {
        let url = self.url(ANALYZE_RESUME_ENDPOINT);

        let part = Part::bytes(upload.content.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.kind.mime_type())?;
        let form = Form::new().part("resume", part);

        info!(
            "Uploading resume {} ({} bytes) to: {}",
            upload.file_name,
            upload.content.len(),
            url
        );

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::read_response(response, ANALYZE_RESUME_ENDPOINT, ANALYZE_RESUME_FALLBACK).await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.url(HEALTH_ENDPOINT);
        info!("Checking backend health: {}", url);

        let response = self.client.get(&url).send().await?;
        Self::read_response(response, HEALTH_ENDPOINT, HEALTH_FALLBACK).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_becomes_message() {
        let err = parse_body::<AnalysisResult>(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "LLM unavailable"}"#,
            SUMMARIZE_ENDPOINT,
            SUMMARIZE_FALLBACK,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "LLM unavailable");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.code(), "BACKEND_ERROR");
    }

    #[test]
    fn test_error_without_detail_uses_fallback() {
        let err = parse_body::<AnalysisResult>(
            StatusCode::BAD_GATEWAY,
            "<html>bad gateway</html>",
            SUMMARIZE_ENDPOINT,
            SUMMARIZE_FALLBACK,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to analyze job description");

        let err = parse_body::<Vec<RawJobRecord>>(
            StatusCode::INTERNAL_SERVER_ERROR,
            "{}",
            SCRAPE_ENDPOINT,
            SCRAPE_FALLBACK,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch jobs");
    }

    #[test]
    fn test_success_body_decodes() {
        let jobs: Vec<RawJobRecord> = parse_body(
            StatusCode::OK,
            r#"[{"title": "X", "job_url": "http://a"}]"#,
            SCRAPE_ENDPOINT,
            SCRAPE_FALLBACK,
        )
        .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].resolve_link().as_deref(), Some("http://a"));
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let err = parse_body::<AnalysisResult>(
            StatusCode::OK,
            "not json",
            SUMMARIZE_ENDPOINT,
            SUMMARIZE_FALLBACK,
        )
        .unwrap_err();
        assert_eq!(err.code(), "BACKEND_BAD_RESPONSE");
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let client = ServiceClient::new("http://localhost:8001/", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8001");
        assert_eq!(client.url(SCRAPE_ENDPOINT), "http://localhost:8001/api/scrape");
    }
}
