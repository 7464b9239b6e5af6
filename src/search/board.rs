// src/search/board.rs
//! Shared, observable list of jobs for the current search

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::types::JobViewState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoardPhase {
    #[default]
    Idle,
    /// Base list published, analyzers still running
    Analyzing,
    /// Final filtered list published
    Complete,
}

#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    /// Search that owns `jobs`; 0 before the first search publishes
    pub generation: u64,
    pub phase: BoardPhase,
    pub jobs: Vec<JobViewState>,
}

/// Cloneable handle to the job list.
///
/// Every search takes a generation from [`begin_search`](Self::begin_search).
/// A search is superseded once a newer generation has published a list; its
/// writes are dropped from then on. A newer search that never publishes (its
/// scrape failed) supersedes nothing.
#[derive(Clone)]
pub struct JobBoard {
    tx: Arc<watch::Sender<BoardSnapshot>>,
    issued: Arc<AtomicU64>,
}

impl JobBoard {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(BoardSnapshot::default());
        Self {
            tx: Arc::new(tx),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.tx.borrow().clone()
    }

    pub fn jobs(&self) -> Vec<JobViewState> {
        self.tx.borrow().jobs.clone()
    }

    /// Issue a generation for a new search; the visible list is left as is
    pub fn begin_search(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// False once a newer search has published its list
    pub fn is_current(&self, generation: u64) -> bool {
        self.tx.borrow().generation <= generation
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the whole list; returns false if `generation` was superseded
    pub fn replace(&self, generation: u64, phase: BoardPhase, jobs: Vec<JobViewState>) -> bool {
        self.tx.send_if_modified(|snapshot| {
            if snapshot.generation > generation {
                return false;
            }
            snapshot.generation = generation;
            snapshot.phase = phase;
            snapshot.jobs = jobs;
            true
        })
    }

    /// Apply `update` to the job at `index` only, if it still belongs to `generation`
    pub fn update_job<F>(&self, generation: u64, index: usize, update: F) -> bool
    where
        F: FnOnce(&mut JobViewState),
    {
        let applied = self.tx.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                return false;
            }
            match snapshot.jobs.get_mut(index) {
                Some(job) => {
                    update(job);
                    true
                }
                None => false,
            }
        });

        if !applied {
            debug!(
                "Dropped update for job {} of superseded search {}",
                index, generation
            );
        }
        applied
    }
}

impl Default for JobBoard {
    fn default() -> Self {
        Self::new()
    }
}
