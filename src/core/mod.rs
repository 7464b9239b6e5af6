// src/core/mod.rs
//! Backend access and client-side upload checks

pub mod backend;
pub mod resume_validator;
pub mod service_client;

pub use backend::{ApiError, JobBackend};
pub use resume_validator::{ResumeUpload, ResumeValidationError, ResumeValidator};
pub use service_client::ServiceClient;
