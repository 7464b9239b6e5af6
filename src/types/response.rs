use serde::{Deserialize, Serialize};

fn default_valid() -> bool {
    true
}

// ===== Service Response Types =====

/// LLM-backed analysis of one job description, as returned by the summarize endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_skills: Vec<String>,
    #[serde(default)]
    pub required_experience: String,
    #[serde(default)]
    pub company_culture: String,
    #[serde(default)]
    pub estimated_salary_range: String,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            valid: true,
            summary: String::new(),
            key_skills: Vec::new(),
            required_experience: String::new(),
            company_culture: String::new(),
            estimated_salary_range: String::new(),
        }
    }
}

/// Search parameters extracted from an uploaded resume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_years")]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// The resume endpoint relays LLM output, so years may come back as a float or a string
fn lenient_years<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    #[serde(default)]
    pub llm_provider: Option<String>,
}

/// Error body the backend attaches to non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// `detail` as display text; validation errors arrive as a JSON array
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Null | serde_json::Value::String(_) => None,
            other => Some(other.to_string()),
        }
    }
}
