//! Shared fixtures for the integration tests: an in-memory job backend and a
//! notifier that records what the user would have seen.

#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use job_hunter::core::{ApiError, JobBackend, ResumeUpload};
use job_hunter::search::{Notification, Notifier};
use job_hunter::types::{
    AnalysisResult, HealthResponse, RawJobRecord, ResumeProfile, SearchCriteria, SummarizeRequest,
};

/// What the mock answers for one summarize call
#[derive(Debug, Clone)]
pub enum Reply {
    Analysis(AnalysisResult),
    Status(u16, &'static str),
    /// A request that never reaches a server
    Unreachable,
}

#[derive(Debug, Clone)]
struct Scripted<T> {
    reply: T,
    delay: Option<Duration>,
}

#[derive(Debug, Clone)]
enum ScrapeReply {
    Jobs(Vec<RawJobRecord>),
    Status(u16, &'static str),
}

/// Scrape answers are keyed by search term, summarize answers by job link.
/// Unknown links get a valid default analysis.
#[derive(Default)]
pub struct MockBackend {
    scrapes: Mutex<HashMap<String, Scripted<ScrapeReply>>>,
    summaries: Mutex<HashMap<String, Scripted<Reply>>>,
    resume: Mutex<Option<ResumeProfile>>,
    scrape_calls: AtomicUsize,
    summarize_calls: AtomicUsize,
    resume_calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(self, search_term: &str, jobs: Vec<RawJobRecord>) -> Self {
        self.script_scrape(search_term, ScrapeReply::Jobs(jobs), None)
    }

    pub fn with_slow_jobs(self, search_term: &str, jobs: Vec<RawJobRecord>, delay: Duration) -> Self {
        self.script_scrape(search_term, ScrapeReply::Jobs(jobs), Some(delay))
    }

    pub fn with_scrape_failure(self, search_term: &str, status: u16, detail: &'static str) -> Self {
        self.script_scrape(search_term, ScrapeReply::Status(status, detail), None)
    }

    pub fn with_summary(self, link: &str, reply: Reply) -> Self {
        self.script_summary(link, reply, None)
    }

    pub fn with_slow_summary(self, link: &str, reply: Reply, delay: Duration) -> Self {
        self.script_summary(link, reply, Some(delay))
    }

    pub fn with_resume_profile(self, profile: ResumeProfile) -> Self {
        *self.resume.lock().unwrap() = Some(profile);
        self
    }

    pub fn scrape_calls(&self) -> usize {
        self.scrape_calls.load(Ordering::SeqCst)
    }

    pub fn summarize_calls(&self) -> usize {
        self.summarize_calls.load(Ordering::SeqCst)
    }

    pub fn resume_calls(&self) -> usize {
        self.resume_calls.load(Ordering::SeqCst)
    }

    fn script_scrape(self, term: &str, reply: ScrapeReply, delay: Option<Duration>) -> Self {
        self.scrapes
            .lock()
            .unwrap()
            .insert(term.to_string(), Scripted { reply, delay });
        self
    }

    fn script_summary(self, link: &str, reply: Reply, delay: Option<Duration>) -> Self {
        self.summaries
            .lock()
            .unwrap()
            .insert(link.to_string(), Scripted { reply, delay });
        self
    }
}

#[async_trait]
impl JobBackend for MockBackend {
    async fn scrape(&self, criteria: &SearchCriteria) -> Result<Vec<RawJobRecord>, ApiError> {
        self.scrape_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .scrapes
            .lock()
            .unwrap()
            .get(&criteria.search_term)
            .cloned();

        let Some(scripted) = scripted else {
            return Ok(Vec::new());
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        match scripted.reply {
            ScrapeReply::Jobs(jobs) => Ok(jobs),
            ScrapeReply::Status(status, detail) => Err(status_error(status, detail)),
        }
    }

    async fn summarize(&self, request: &SummarizeRequest<'_>) -> Result<AnalysisResult, ApiError> {
        self.summarize_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.summaries.lock().unwrap().get(request.url).cloned();

        let Some(scripted) = scripted else {
            return Ok(AnalysisResult::default());
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        match scripted.reply {
            Reply::Analysis(analysis) => Ok(analysis),
            Reply::Status(status, detail) => Err(status_error(status, detail)),
            Reply::Unreachable => Err(transport_error().await),
        }
    }

    async fn analyze_resume(&self, _upload: &ResumeUpload) -> Result<ResumeProfile, ApiError> {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        match self.resume.lock().unwrap().clone() {
            Some(profile) => Ok(profile),
            None => Err(status_error(500, "Failed to analyze resume")),
        }
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        Ok(HealthResponse {
            message: "ok".to_string(),
            llm_provider: Some("mock".to_string()),
        })
    }
}

fn status_error(status: u16, detail: &str) -> ApiError {
    ApiError::Status {
        status: StatusCode::from_u16(status).unwrap(),
        detail: detail.to_string(),
    }
}

/// A real transport error: nothing listens on port 1
async fn transport_error() -> ApiError {
    let err = reqwest::Client::new()
        .get("http://127.0.0.1:1/")
        .timeout(Duration::from_secs(2))
        .send()
        .await
        .unwrap_err();
    ApiError::Transport(err)
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// A scraped row with the fields the scraper normally fills in
pub fn job(title: &str, link: &str, description: Option<&str>) -> RawJobRecord {
    let value = json!({
        "title": title,
        "company": format!("{} Inc", title),
        "location": "Remote",
        "date_posted": "2024-01-01",
        "job_url": link,
        "description": description,
    });
    record(value)
}

pub fn record(value: Value) -> RawJobRecord {
    serde_json::from_value(value).unwrap()
}

pub fn analysis(summary: &str) -> AnalysisResult {
    AnalysisResult {
        summary: summary.to_string(),
        ..Default::default()
    }
}

pub fn invalid_analysis() -> AnalysisResult {
    AnalysisResult {
        valid: false,
        summary: "Not a real posting".to_string(),
        ..Default::default()
    }
}
