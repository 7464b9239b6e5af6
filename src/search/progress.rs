// src/search/progress.rs
use tokio::sync::mpsc;

use crate::types::JobViewState;

/// One per-job transition (analysis started or settled) as it reached the board
#[derive(Debug, Clone, PartialEq)]
pub struct JobProgress {
    pub generation: u64,
    pub index: usize,
    pub total: usize,
    pub job: JobViewState,
}

pub type ProgressSender = mpsc::UnboundedSender<JobProgress>;
pub type ProgressReceiver = mpsc::UnboundedReceiver<JobProgress>;

/// Unbounded so analyzers never wait on the consumer; every transition is kept
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}
