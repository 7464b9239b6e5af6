// src/core/backend.rs
//! The remote collaborators a search talks to

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::types::{
    AnalysisResult, HealthResponse, RawJobRecord, ResumeProfile, SearchCriteria, SummarizeRequest,
};

use super::resume_validator::ResumeUpload;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-2xx status
    #[error("{detail}")]
    Status { status: StatusCode, detail: String },
    /// A 2xx body that does not have the expected shape
    #[error("Failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "BACKEND_UNREACHABLE",
            Self::Status { .. } => "BACKEND_ERROR",
            Self::Decode { .. } => "BACKEND_BAD_RESPONSE",
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Scrape, summarize and resume-analysis endpoints of the job backend
#[async_trait]
pub trait JobBackend: Send + Sync {
    async fn scrape(&self, criteria: &SearchCriteria) -> Result<Vec<RawJobRecord>, ApiError>;

    async fn summarize(&self, request: &SummarizeRequest<'_>) -> Result<AnalysisResult, ApiError>;

    async fn analyze_resume(&self, upload: &ResumeUpload) -> Result<ResumeProfile, ApiError>;

    async fn health(&self) -> Result<HealthResponse, ApiError>;
}
