// src/render.rs
//! Result list presentation: text for the terminal, JSON and CSV for export

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write as _;

use crate::types::{JobStatus, JobViewState};
use crate::utils::{clean_text, truncate_chars};

const SUMMARY_PREVIEW_CHARS: usize = 600;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render(jobs: &[JobViewState], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(jobs)),
        OutputFormat::Json => render_json(jobs),
        OutputFormat::Csv => render_csv(jobs),
    }
}

pub fn render_text(jobs: &[JobViewState]) -> String {
    if jobs.is_empty() {
        return "No results. Enter your search criteria to begin.\n".to_string();
    }

    let mut out = String::new();
    for (index, job) in jobs.iter().enumerate() {
        render_job(&mut out, index + 1, job);
        out.push('\n');
    }
    let _ = writeln!(out, "Found {} results", jobs.len());
    out
}

fn render_job(out: &mut String, position: usize, job: &JobViewState) {
    let posting = &job.posting;
    let _ = writeln!(out, "{}. {}", position, posting.title);
    if !posting.link.is_empty() {
        let _ = writeln!(out, "   {}", posting.link);
    }

    let mut meta = vec![
        posting.company.as_str(),
        posting.location.as_str(),
        posting.date_posted.as_str(),
    ];
    if let Some(salary) = posting.salary.as_deref() {
        meta.push(salary);
    }
    meta.retain(|m| !m.is_empty());
    if !meta.is_empty() {
        let _ = writeln!(out, "   {}", meta.join(" | "));
    }

    match job.status() {
        JobStatus::Analyzing => {
            let _ = writeln!(out, "   Analyzing...");
        }
        JobStatus::Analyzed => {
            if let Some(analysis) = job.analysis.as_ref() {
                let summary = truncate_chars(&clean_text(&analysis.summary), SUMMARY_PREVIEW_CHARS);
                let _ = writeln!(out, "   {}", summary);
                if !analysis.key_skills.is_empty() {
                    let _ = writeln!(out, "   Required Skills: {}", analysis.key_skills.join(", "));
                }
                let _ = writeln!(out, "   Experience Required: {}", analysis.required_experience);
                let _ = writeln!(out, "   Company Culture: {}", analysis.company_culture);
                if !analysis.estimated_salary_range.is_empty() {
                    let _ = writeln!(
                        out,
                        "   Estimated Salary Range: {}",
                        analysis.estimated_salary_range
                    );
                }
            }
        }
        JobStatus::AnalysisFailed => {
            let _ = writeln!(
                out,
                "   Error analyzing job: {}",
                job.analysis_error.as_deref().unwrap_or_default()
            );
        }
        JobStatus::Pending => {}
    }
}

/// One-line progress entry used while analyses settle
pub fn render_status_line(index: usize, total: usize, job: &JobViewState) -> String {
    let mut line = format!(
        "[{}/{}] {}: {} at {}",
        index + 1,
        total,
        job.status().label(),
        job.posting.title,
        job.posting.company
    );
    if let Some(error) = job.analysis_error.as_deref() {
        let _ = write!(line, " ({})", error);
    }
    line
}

pub fn render_json(jobs: &[JobViewState]) -> Result<String> {
    serde_json::to_string_pretty(jobs).context("Failed to serialize jobs to JSON")
}

#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    company: &'a str,
    location: &'a str,
    date_posted: &'a str,
    link: &'a str,
    salary: &'a str,
    status: &'static str,
    valid: Option<bool>,
    summary: &'a str,
    key_skills: String,
    required_experience: &'a str,
    company_culture: &'a str,
    estimated_salary_range: &'a str,
    analysis_error: &'a str,
}

impl<'a> From<&'a JobViewState> for CsvRow<'a> {
    fn from(job: &'a JobViewState) -> Self {
        let analysis = job.analysis.as_ref();
        Self {
            title: &job.posting.title,
            company: &job.posting.company,
            location: &job.posting.location,
            date_posted: &job.posting.date_posted,
            link: &job.posting.link,
            salary: job.posting.salary.as_deref().unwrap_or_default(),
            status: job.status().label(),
            valid: analysis.map(|a| a.valid),
            summary: analysis.map(|a| a.summary.as_str()).unwrap_or_default(),
            key_skills: analysis.map(|a| a.key_skills.join("; ")).unwrap_or_default(),
            required_experience: analysis
                .map(|a| a.required_experience.as_str())
                .unwrap_or_default(),
            company_culture: analysis
                .map(|a| a.company_culture.as_str())
                .unwrap_or_default(),
            estimated_salary_range: analysis
                .map(|a| a.estimated_salary_range.as_str())
                .unwrap_or_default(),
            analysis_error: job.analysis_error.as_deref().unwrap_or_default(),
        }
    }
}

pub fn render_csv(jobs: &[JobViewState]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for job in jobs {
        writer
            .serialize(CsvRow::from(job))
            .context("Failed to write CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
