// src/search/orchestrator.rs
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::analyzer::JobAnalyzer;
use super::board::{BoardPhase, JobBoard};
use super::notify::{Notification, Notifier};
use super::progress::ProgressSender;
use crate::config::AnalysisDefaults;
use crate::core::{ApiError, JobBackend};
use crate::types::{AnalysisOptions, JobPosting, JobStatus, JobViewState, SearchCriteria};

const SUCCESS_MESSAGE: &str = "Jobs fetched and analyzed successfully!";

/// Outcome counts for one search
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub generation: u64,
    pub found: usize,
    pub analyzed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub filtered_invalid: usize,
    pub displayed: usize,
    /// A newer search took over the board before this one finished
    pub superseded: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub struct SearchOrchestrator {
    backend: Arc<dyn JobBackend>,
    board: JobBoard,
    notifier: Arc<dyn Notifier>,
    analysis_defaults: AnalysisDefaults,
    progress: Option<ProgressSender>,
}

impl SearchOrchestrator {
    pub fn new(
        backend: Arc<dyn JobBackend>,
        board: JobBoard,
        notifier: Arc<dyn Notifier>,
        analysis_defaults: AnalysisDefaults,
    ) -> Self {
        Self {
            backend,
            board,
            notifier,
            analysis_defaults,
            progress: None,
        }
    }

    /// Stream per-job transitions to `progress` while searches run
    pub fn with_progress(mut self, progress: ProgressSender) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn board(&self) -> &JobBoard {
        &self.board
    }

    /// Scrape, publish the base list, analyze every job, then publish the filtered list.
    ///
    /// A scrape failure leaves the board untouched and is returned; analysis
    /// failures stay on their job. A search whose scrape fails never publishes,
    /// so it does not supersede one that is still running.
    pub async fn run(&self, criteria: &SearchCriteria) -> Result<SearchReport, ApiError> {
        let generation = self.board.begin_search();
        let span = info_span!("job_search", generation);

        self.run_inner(generation, criteria).instrument(span).await
    }

    async fn run_inner(
        &self,
        generation: u64,
        criteria: &SearchCriteria,
    ) -> Result<SearchReport, ApiError> {
        let started_at = Utc::now();
        info!("Starting job search");
        debug!("Search parameters: {:?}", criteria);

        let raw_jobs = match self.backend.scrape(criteria).await {
            Ok(jobs) => jobs,
            Err(e) => {
                error!("Error during job search [{}]: {}", e.code(), e);
                self.notifier.notify(Notification::error(e.to_string()));
                info!("Job search completed");
                return Err(e);
            }
        };

        let base_jobs: Vec<JobViewState> = raw_jobs
            .iter()
            .map(|raw| JobViewState::new(JobPosting::from(raw)))
            .collect();
        let found = base_jobs.len();
        info!("Found {} jobs", found);

        let mut report = SearchReport {
            generation,
            found,
            analyzed: 0,
            failed: 0,
            skipped: 0,
            filtered_invalid: 0,
            displayed: 0,
            superseded: false,
            started_at,
            finished_at: started_at,
        };

        if !self
            .board
            .replace(generation, BoardPhase::Analyzing, base_jobs.clone())
        {
            warn!("Search {} was superseded before publishing; skipping analysis", generation);
            report.superseded = true;
            report.finished_at = Utc::now();
            return Ok(report);
        }

        info!("Starting job analysis for all jobs");
        let analyzer = JobAnalyzer::new(
            self.backend.clone(),
            self.board.clone(),
            AnalysisOptions::for_criteria(criteria, &self.analysis_defaults),
        )
        .with_progress(self.progress.clone());
        let settled = join_all(
            base_jobs
                .into_iter()
                .enumerate()
                .map(|(index, job)| analyzer.analyze(generation, index, job)),
        )
        .await;

        for job in &settled {
            match job.status() {
                JobStatus::Analyzed => report.analyzed += 1,
                JobStatus::AnalysisFailed => report.failed += 1,
                JobStatus::Pending | JobStatus::Analyzing => report.skipped += 1,
            }
        }

        let valid_jobs: Vec<JobViewState> = settled
            .into_iter()
            .filter(|job| !job.is_explicitly_invalid())
            .collect();
        report.filtered_invalid = found - valid_jobs.len();
        report.displayed = valid_jobs.len();
        info!(
            "Analysis completed. {} valid jobs found ({} analyzed, {} failed, {} skipped)",
            report.displayed, report.analyzed, report.failed, report.skipped
        );

        if self.board.replace(generation, BoardPhase::Complete, valid_jobs) {
            self.notifier.notify(Notification::success(SUCCESS_MESSAGE));
        } else {
            warn!("Search {} was superseded; discarding its results", generation);
            report.superseded = true;
        }

        report.finished_at = Utc::now();
        info!("Job search completed");
        Ok(report)
    }
}
