// src/types/mod.rs
pub mod criteria;
pub mod job;
pub mod response;

pub use criteria::{AnalysisOptions, SearchCriteria, SummarizeRequest, SummaryLength};
pub use job::{JobPosting, JobStatus, JobViewState, RawJobRecord};
pub use response::{AnalysisResult, HealthResponse, ResumeProfile};
