// src/forms/mod.rs
//! Search forms - each variant validates its input and produces a scrape payload

pub mod resume;
pub mod skills;

pub use resume::{resume_criteria, ResumeSearchError, ResumeSearchForm};
pub use skills::SkillSet;

use crate::config::SearchDefaults;
use crate::types::SearchCriteria;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be at least {min}")]
    OutOfRange { field: &'static str, min: u32 },
    #[error("Describe the job you are looking for")]
    EmptyPrompt,
}

impl FormError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "FORM_MISSING_FIELD",
            Self::InvalidNumber { .. } => "FORM_INVALID_NUMBER",
            Self::OutOfRange { .. } => "FORM_OUT_OF_RANGE",
            Self::EmptyPrompt => "FORM_EMPTY_PROMPT",
        }
    }
}

/// Structured search: term, location, experience and skills
#[derive(Debug, Clone, Default)]
pub struct ManualSearchForm {
    pub search_term: String,
    pub location: String,
    /// Raw text as typed; blank means "not specified"
    pub experience_years: String,
    pub results_wanted: Option<u32>,
    pub hours_old: Option<u32>,
    pub site_name: Vec<String>,
    pub country_indeed: Option<String>,
    pub skills: SkillSet,
}

impl ManualSearchForm {
    pub fn new(search_term: &str, location: &str) -> Self {
        Self {
            search_term: search_term.to_string(),
            location: location.to_string(),
            ..Default::default()
        }
    }

    pub fn submit(&self, defaults: &SearchDefaults) -> Result<SearchCriteria, FormError> {
        let search_term = required(&self.search_term, "Search term")?;
        let location = required(&self.location, "Location")?;
        let experience_years = parse_experience(&self.experience_years)?;

        let mut criteria = SearchCriteria::with_defaults(defaults);
        criteria.search_term = search_term;
        criteria.location = location;
        criteria.experience_years = experience_years;
        criteria.required_skills = self.skills.as_slice().to_vec();
        apply_overrides(
            &mut criteria,
            self.results_wanted,
            self.hours_old,
            &self.site_name,
            self.country_indeed.as_deref(),
        )?;

        Ok(criteria)
    }
}

/// Free-text "describe your ideal job" search
#[derive(Debug, Clone, Default)]
pub struct WizardForm {
    pub prompt: String,
}

impl WizardForm {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
        }
    }

    /// The prompt travels with placeholder scrape defaults; the backend interprets it
    pub fn submit(&self, defaults: &SearchDefaults) -> Result<SearchCriteria, FormError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(FormError::EmptyPrompt);
        }

        let mut criteria = SearchCriteria::with_defaults(defaults);
        criteria.prompt = Some(prompt.to_string());
        Ok(criteria)
    }
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_experience(raw: &str) -> Result<Option<u32>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber {
            field: "Years of experience",
            value: raw.to_string(),
        })
}

pub(crate) fn apply_overrides(
    criteria: &mut SearchCriteria,
    results_wanted: Option<u32>,
    hours_old: Option<u32>,
    site_name: &[String],
    country_indeed: Option<&str>,
) -> Result<(), FormError> {
    if let Some(results) = results_wanted {
        if results < 1 {
            return Err(FormError::OutOfRange {
                field: "Number of results",
                min: 1,
            });
        }
        criteria.results_wanted = results;
    }
    if let Some(hours) = hours_old {
        if hours < 1 {
            return Err(FormError::OutOfRange {
                field: "Hours old",
                min: 1,
            });
        }
        criteria.hours_old = hours;
    }

    let sites: Vec<String> = site_name
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if !sites.is_empty() {
        criteria.site_name = sites;
    }

    if let Some(country) = country_indeed.map(str::trim).filter(|c| !c.is_empty()) {
        criteria.country_indeed = country.to_lowercase();
    }
    Ok(())
}
