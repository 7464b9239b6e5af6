// src/core/resume_validator.rs
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

use crate::utils::get_file_extension;

const PDF_SIGNATURE: &[u8] = b"%PDF";
const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    Pdf,
    Docx,
}

impl ResumeKind {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match get_file_extension(file_name)?.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    fn signature(&self) -> &'static [u8] {
        match self {
            Self::Pdf => PDF_SIGNATURE,
            // DOCX is a zip container
            Self::Docx => ZIP_SIGNATURE,
        }
    }
}

/// A resume that passed client-side checks and is ready for upload
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub kind: ResumeKind,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ResumeValidationError {
    pub path: PathBuf,
    pub error_type: ResumeErrorType,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeErrorType {
    FileNotFound,
    UnsupportedType,
    EmptyFile,
    TooLarge,
    CorruptedFile,
    UnreadableFile,
}

impl ResumeErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileNotFound => "RESUME_NOT_FOUND",
            Self::UnsupportedType => "RESUME_UNSUPPORTED_TYPE",
            Self::EmptyFile => "RESUME_EMPTY",
            Self::TooLarge => "RESUME_TOO_LARGE",
            Self::CorruptedFile => "RESUME_CORRUPTED",
            Self::UnreadableFile => "RESUME_UNREADABLE",
        }
    }
}

impl ResumeValidationError {
    fn new(path: &Path, error_type: ResumeErrorType, message: String, suggestion: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            error_type,
            message,
            suggestion: suggestion.to_string(),
        }
    }
}

pub struct ResumeValidator;

impl ResumeValidator {
    /// Check type, size and file signature; no network call happens before this passes
    pub async fn validate(
        path: &Path,
        max_bytes: u64,
    ) -> Result<ResumeUpload, ResumeValidationError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let kind = ResumeKind::from_file_name(&file_name).ok_or_else(|| {
            ResumeValidationError::new(
                path,
                ResumeErrorType::UnsupportedType,
                format!("Unsupported resume format: {}", file_name),
                "Please upload a PDF or DOCX file",
            )
        })?;

        let metadata = fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResumeValidationError::new(
                    path,
                    ResumeErrorType::FileNotFound,
                    format!("Resume not found: {}", path.display()),
                    "Check the file path and try again",
                )
            } else {
                ResumeValidationError::new(
                    path,
                    ResumeErrorType::UnreadableFile,
                    format!("Cannot read resume metadata: {}", e),
                    "Check file permissions and try again",
                )
            }
        })?;

        if metadata.len() == 0 {
            return Err(ResumeValidationError::new(
                path,
                ResumeErrorType::EmptyFile,
                "Resume file is empty".to_string(),
                "Please upload a valid resume file",
            ));
        }

        if metadata.len() > max_bytes {
            return Err(ResumeValidationError::new(
                path,
                ResumeErrorType::TooLarge,
                format!(
                    "Resume too large: {:.1}MB (max {:.0}MB)",
                    metadata.len() as f64 / 1024.0 / 1024.0,
                    max_bytes as f64 / 1024.0 / 1024.0
                ),
                "Please upload a smaller file",
            ));
        }

        let content = fs::read(path).await.map_err(|e| {
            ResumeValidationError::new(
                path,
                ResumeErrorType::UnreadableFile,
                format!("Cannot read resume: {}", e),
                "Check file permissions and try again",
            )
        })?;

        if !content.starts_with(kind.signature()) {
            return Err(ResumeValidationError::new(
                path,
                ResumeErrorType::CorruptedFile,
                format!(
                    "{} does not look like a valid {} file",
                    file_name,
                    match kind {
                        ResumeKind::Pdf => "PDF",
                        ResumeKind::Docx => "DOCX",
                    }
                ),
                "Re-export the resume and try again",
            ));
        }

        info!("Resume validation passed: {} ({} bytes)", file_name, content.len());
        Ok(ResumeUpload {
            file_name,
            kind,
            content,
        })
    }

    /// Validate and log the failure with its code
    pub async fn validate_for_upload(
        path: &Path,
        max_bytes: u64,
    ) -> Result<ResumeUpload, ResumeValidationError> {
        Self::validate(path, max_bytes).await.inspect_err(|e| {
            error!(
                "Resume validation failed [{}]: {}",
                e.error_type.code(),
                e.message
            );
        })
    }
}
