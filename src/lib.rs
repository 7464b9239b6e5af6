//! Job search client: scrape postings through the job backend, then analyze
//! each one with the backend's LLM summarizer.

pub mod cli;
pub mod config;
pub mod core;
pub mod forms;
pub mod logging;
pub mod render;
pub mod search;
pub mod types;
pub mod utils;

pub use crate::config::AppConfig;
pub use crate::core::{ApiError, JobBackend, ServiceClient};
pub use crate::search::{JobBoard, SearchOrchestrator, SearchReport};
