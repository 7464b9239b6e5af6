// src/types/job.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::response::AnalysisResult;

/// Keys the scraper may use for a posting's link, in priority order
const LINK_KEYS: [&str; 3] = ["job_url", "link", "url"];

/// A job record exactly as the scrape endpoint returned it.
///
/// The scraper emits loosely typed rows (numbers for salaries, nulls for
/// missing columns), so the record is kept as a JSON map until it is mapped
/// into a [`JobPosting`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawJobRecord(pub Map<String, Value>);

impl RawJobRecord {
    /// Text value of a field, with numbers and booleans rendered as strings
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Like [`text`](Self::text) but treats blank strings as absent
    pub fn non_empty_text(&self, key: &str) -> Option<String> {
        self.text(key).filter(|s| !s.trim().is_empty())
    }

    /// First non-empty link among `job_url`, `link` and `url`
    pub fn resolve_link(&self) -> Option<String> {
        LINK_KEYS.iter().find_map(|key| self.non_empty_text(key))
    }
}

impl From<Map<String, Value>> for RawJobRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub date_posted: String,
    pub link: String,
    pub salary: Option<String>,
    pub description: Option<String>,
}

impl JobPosting {
    /// Any non-empty text counts, whitespace included
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Whether the summarize endpoint can be called for this posting
    pub fn is_analyzable(&self) -> bool {
        self.has_description() && !self.link.is_empty()
    }
}

impl From<&RawJobRecord> for JobPosting {
    fn from(raw: &RawJobRecord) -> Self {
        Self {
            title: raw.text("title").unwrap_or_default(),
            company: raw.text("company").unwrap_or_default(),
            location: raw.text("location").unwrap_or_default(),
            date_posted: raw.text("date_posted").unwrap_or_default(),
            link: raw.resolve_link().unwrap_or_default(),
            salary: raw.non_empty_text("salary"),
            description: raw.text("description").filter(|d| !d.is_empty()),
        }
    }
}

/// Display status derived from a [`JobViewState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Analyzing,
    Analyzed,
    AnalysisFailed,
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Analyzing => "analyzing",
            Self::Analyzed => "analyzed",
            Self::AnalysisFailed => "analysis failed",
        }
    }
}

/// A posting plus the transient analysis fields shown in the result list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobViewState {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub is_analyzing: bool,
    pub analysis_error: Option<String>,
    pub analysis: Option<AnalysisResult>,
}

impl JobViewState {
    pub fn new(posting: JobPosting) -> Self {
        Self {
            posting,
            ..Default::default()
        }
    }

    pub fn status(&self) -> JobStatus {
        if self.is_analyzing {
            JobStatus::Analyzing
        } else if self.analysis.is_some() {
            JobStatus::Analyzed
        } else if self.analysis_error.is_some() {
            JobStatus::AnalysisFailed
        } else {
            JobStatus::Pending
        }
    }

    /// Jobs are dropped from the final list only on an explicit `valid: false`
    pub fn is_explicitly_invalid(&self) -> bool {
        self.analysis.as_ref().is_some_and(|a| !a.valid)
    }

    pub(crate) fn start_analysis(&mut self) {
        self.is_analyzing = true;
        self.analysis_error = None;
    }

    pub(crate) fn finish_analysis(&mut self, analysis: AnalysisResult) {
        self.is_analyzing = false;
        self.analysis = Some(analysis);
    }

    pub(crate) fn fail_analysis(&mut self, message: String) {
        self.is_analyzing = false;
        self.analysis_error = Some(message);
    }
}

impl From<JobPosting> for JobViewState {
    fn from(posting: JobPosting) -> Self {
        Self::new(posting)
    }
}
