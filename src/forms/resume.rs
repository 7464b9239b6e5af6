// src/forms/resume.rs
//! Resume-driven search: validate locally, upload, merge the extracted profile

use std::path::Path;
use tracing::info;

use super::{apply_overrides, FormError};
use crate::config::AppConfig;
use crate::core::{ApiError, JobBackend, ResumeValidationError, ResumeValidator};
use crate::types::{ResumeProfile, SearchCriteria};

#[derive(Debug, thiserror::Error)]
pub enum ResumeSearchError {
    #[error(transparent)]
    Validation(#[from] ResumeValidationError),
    #[error("Resume analysis failed: {0}")]
    Backend(#[from] ApiError),
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Overrides a resume search may carry alongside the uploaded file
#[derive(Debug, Clone, Default)]
pub struct ResumeSearchForm {
    pub results_wanted: Option<u32>,
    pub hours_old: Option<u32>,
    pub location: Option<String>,
}

impl ResumeSearchForm {
    /// Merge the resume analysis into criteria; a resume without a role is unusable
    pub fn submit(
        &self,
        profile: ResumeProfile,
        defaults: &crate::config::SearchDefaults,
    ) -> Result<SearchCriteria, FormError> {
        let mut criteria = SearchCriteria::with_defaults(defaults).merge_resume(profile);
        if let Some(location) = self.location.as_deref().filter(|l| !l.trim().is_empty()) {
            criteria.location = location.trim().to_string();
        }
        if criteria.search_term.is_empty() {
            return Err(FormError::MissingField("Search term"));
        }
        apply_overrides(&mut criteria, self.results_wanted, self.hours_old, &[], None)?;
        Ok(criteria)
    }
}

/// Turn a resume file into search criteria. Nothing is uploaded unless the file passes validation.
pub async fn resume_criteria(
    backend: &dyn JobBackend,
    path: &Path,
    form: &ResumeSearchForm,
    config: &AppConfig,
) -> Result<SearchCriteria, ResumeSearchError> {
    let upload = ResumeValidator::validate_for_upload(path, config.resume.max_bytes).await?;
    let profile = backend.analyze_resume(&upload).await?;
    info!(
        "Resume suggests '{}' in '{}' with {} skills",
        profile.search_term,
        profile.location,
        profile.required_skills.len()
    );

    Ok(form.submit(profile, &config.search)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchDefaults;

    #[test]
    fn test_resume_form_merges_profile() {
        let form = ResumeSearchForm {
            results_wanted: Some(10),
            ..Default::default()
        };
        let profile = ResumeProfile {
            search_term: "Data Engineer".to_string(),
            location: "London".to_string(),
            experience_years: Some(6),
            required_skills: vec!["spark".to_string()],
        };

        let criteria = form.submit(profile, &SearchDefaults::default()).unwrap();
        assert_eq!(criteria.search_term, "Data Engineer");
        assert_eq!(criteria.location, "London");
        assert_eq!(criteria.results_wanted, 10);
        assert_eq!(criteria.experience_years, Some(6));
    }

    #[test]
    fn test_location_override_and_missing_role() {
        let form = ResumeSearchForm {
            location: Some("Remote".to_string()),
            ..Default::default()
        };
        let profile = ResumeProfile {
            search_term: "SRE".to_string(),
            location: "Paris".to_string(),
            ..Default::default()
        };
        let criteria = form.submit(profile, &SearchDefaults::default()).unwrap();
        assert_eq!(criteria.location, "Remote");

        let err = form
            .submit(ResumeProfile::default(), &SearchDefaults::default())
            .unwrap_err();
        assert_eq!(err, FormError::MissingField("Search term"));
    }
}
