// src/types/criteria.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::response::ResumeProfile;
use crate::config::{AnalysisDefaults, SearchDefaults};

/// Body of a scrape request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub search_term: String,
    pub location: String,
    pub results_wanted: u32,
    pub hours_old: u32,
    pub site_name: Vec<String>,
    pub country_indeed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl SearchCriteria {
    /// Empty criteria carrying the configured scrape defaults
    pub fn with_defaults(defaults: &SearchDefaults) -> Self {
        Self {
            search_term: String::new(),
            location: String::new(),
            results_wanted: defaults.results_wanted,
            hours_old: defaults.hours_old,
            site_name: defaults.site_name.clone(),
            country_indeed: defaults.country_indeed.clone(),
            experience_years: None,
            required_skills: Vec::new(),
            prompt: None,
        }
    }

    /// Merge what the resume analysis extracted; non-empty profile values win
    pub fn merge_resume(mut self, profile: ResumeProfile) -> Self {
        if !profile.search_term.trim().is_empty() {
            self.search_term = profile.search_term.trim().to_string();
        }
        if !profile.location.trim().is_empty() {
            self.location = profile.location.trim().to_string();
        }
        if profile.experience_years.is_some() {
            self.experience_years = profile.experience_years;
        }
        if !profile.required_skills.is_empty() {
            self.required_skills = profile.required_skills;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        };
        f.write_str(s)
    }
}

impl FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(format!(
                "Unsupported summary length: {}. Use short, medium or long",
                other
            )),
        }
    }
}

/// Per-job analysis options derived from the criteria that started the search
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub focus_areas: Vec<String>,
    pub summary_length: SummaryLength,
    pub experience_years: Option<u32>,
    pub required_skills: Vec<String>,
}

impl AnalysisOptions {
    pub fn for_criteria(criteria: &SearchCriteria, defaults: &AnalysisDefaults) -> Self {
        Self {
            focus_areas: defaults.focus_areas.clone(),
            summary_length: defaults.summary_length,
            experience_years: criteria.experience_years,
            required_skills: criteria.required_skills.clone(),
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        let defaults = AnalysisDefaults::default();
        Self {
            focus_areas: defaults.focus_areas,
            summary_length: defaults.summary_length,
            experience_years: None,
            required_skills: Vec::new(),
        }
    }
}

/// Body of a summarize request
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeRequest<'a> {
    pub description: &'a str,
    pub url: &'a str,
    pub focus_areas: &'a [String],
    pub summary_length: SummaryLength,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<&'a [String]>,
}

impl<'a> SummarizeRequest<'a> {
    pub fn new(description: &'a str, url: &'a str, options: &'a AnalysisOptions) -> Self {
        Self {
            description,
            url,
            focus_areas: &options.focus_areas,
            summary_length: options.summary_length,
            experience_years: options.experience_years,
            required_skills: (!options.required_skills.is_empty())
                .then_some(options.required_skills.as_slice()),
        }
    }
}
