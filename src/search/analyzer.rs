// src/search/analyzer.rs
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::board::JobBoard;
use super::progress::{JobProgress, ProgressSender};
use crate::core::JobBackend;
use crate::types::{AnalysisOptions, JobViewState, SummarizeRequest};

/// Requests the LLM analysis of single jobs and mirrors progress onto the board
pub struct JobAnalyzer {
    backend: Arc<dyn JobBackend>,
    board: JobBoard,
    options: AnalysisOptions,
    progress: Option<ProgressSender>,
}

impl JobAnalyzer {
    pub fn new(backend: Arc<dyn JobBackend>, board: JobBoard, options: AnalysisOptions) -> Self {
        Self {
            backend,
            board,
            options,
            progress: None,
        }
    }

    /// Also report every transition applied to the board on `progress`
    pub fn with_progress(mut self, progress: Option<ProgressSender>) -> Self {
        self.progress = progress;
        self
    }

    /// Analyze the job at `index` of search `generation` and return its settled state.
    ///
    /// Jobs without a description or link come back unchanged without a request.
    pub async fn analyze(&self, generation: u64, index: usize, job: JobViewState) -> JobViewState {
        let request_id = short_request_id();
        let span = info_span!("job_analysis", request_id = %request_id, link = %job.posting.link);

        self.analyze_inner(generation, index, job)
            .instrument(span)
            .await
    }

    async fn analyze_inner(
        &self,
        generation: u64,
        index: usize,
        mut job: JobViewState,
    ) -> JobViewState {
        if !job.posting.is_analyzable() {
            warn!("Skipping job analysis - missing description or link");
            return job;
        }

        info!(
            "Starting analysis for job: {} at {}",
            job.posting.title, job.posting.company
        );

        job.start_analysis();
        if self
            .board
            .update_job(generation, index, JobViewState::start_analysis)
        {
            self.report(generation, index, &job);
        }

        let description = job.posting.description.as_deref().unwrap_or_default();
        let request = SummarizeRequest::new(description, &job.posting.link, &self.options);

        match self.backend.summarize(&request).await {
            Ok(analysis) => {
                info!("Analysis completed for job: {}", job.posting.title);
                job.finish_analysis(analysis.clone());
                if self
                    .board
                    .update_job(generation, index, move |j| j.finish_analysis(analysis))
                {
                    self.report(generation, index, &job);
                }
            }
            Err(e) => {
                let message = e.to_string();
                error!("Error analyzing job [{}]: {}", e.code(), message);
                job.fail_analysis(message.clone());
                if self
                    .board
                    .update_job(generation, index, move |j| j.fail_analysis(message))
                {
                    self.report(generation, index, &job);
                }
            }
        }

        job
    }

    fn report(&self, generation: u64, index: usize, job: &JobViewState) {
        let Some(progress) = self.progress.as_ref() else {
            return;
        };
        let event = JobProgress {
            generation,
            index,
            total: self.board.len(),
            job: job.clone(),
        };
        if progress.send(event).is_err() {
            debug!("Progress receiver closed");
        }
    }
}

fn short_request_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
