// src/config.rs
//! Application configuration - environment variables layered over an optional job-hunter.yaml

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::SummaryLength;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const CONFIG_FILE_NAME: &str = "job-hunter.yaml";
pub const DEFAULT_MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_ENVIRONMENT: &str = "local";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub timeout_seconds: u64,
    pub environment: String,
    pub log_file: Option<PathBuf>,
    pub search: SearchDefaults,
    pub analysis: AnalysisDefaults,
    pub resume: ResumeLimits,
}

/// Scrape parameters the forms fall back to
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub results_wanted: u32,
    pub hours_old: u32,
    pub site_name: Vec<String>,
    pub country_indeed: String,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            results_wanted: 20,
            hours_old: 72,
            site_name: vec!["linkedin".to_string()],
            country_indeed: "worldwide".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    pub focus_areas: Vec<String>,
    pub summary_length: SummaryLength,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            focus_areas: vec![
                "skills".to_string(),
                "requirements".to_string(),
                "culture".to_string(),
            ],
            summary_length: SummaryLength::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResumeLimits {
    pub max_bytes: u64,
}

impl Default for ResumeLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_RESUME_BYTES,
        }
    }
}

/// Layout of job-hunter.yaml; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub backend_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub search: SearchDefaults,
    pub analysis: AnalysisDefaults,
    pub resume: ResumeLimits,
}

impl ConfigFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl AppConfig {
    /// Load configuration from job-hunter.yaml (if present) and the process environment
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        let file = if path.exists() {
            Some(ConfigFile::from_path(&path)?)
        } else {
            None
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from a parsed file and an environment lookup
    pub fn from_sources<F>(file: Option<ConfigFile>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let backend_url = non_empty("JOB_HUNTER_BACKEND_URL")
            .or_else(|| non_empty("BACKEND_API_URL"))
            .or(file.backend_url)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let timeout_seconds = match non_empty("JOB_HUNTER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("JOB_HUNTER_TIMEOUT_SECS must be a whole number of seconds"))?,
            None => file.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let environment = non_empty("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let log_file = non_empty("JOB_HUNTER_LOG_FILE")
            .map(PathBuf::from)
            .or(file.log_file);

        Ok(Self {
            backend_url: normalize_base_url(&backend_url),
            timeout_seconds,
            environment,
            log_file,
            search: file.search,
            analysis: file.analysis,
            resume: file.resume,
        })
    }

    pub fn with_backend_url(mut self, url: &str) -> Self {
        self.backend_url = normalize_base_url(url);
        self
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            log_file: None,
            search: SearchDefaults::default(),
            analysis: AnalysisDefaults::default(),
            resume: ResumeLimits::default(),
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
