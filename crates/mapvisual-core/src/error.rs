// crates/mapvisual-core/src/error.rs
use thiserror::Error;

/// Errors produced while assembling a boundary document.
///
/// Only [`BoundaryError::NoUsableSource`] and [`BoundaryError::UnknownBoundary`]
/// are expected to reach a caller of the pipeline. Source and overlay failures
/// are recovered inside the pipeline (the fallback chain advances, the overlay
/// is skipped) and only show up in logs.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// A single source could not be read, fetched or parsed.
    #[error("source '{source_label}' unavailable: {reason}")]
    SourceUnavailable {
        source_label: String,
        reason: String,
    },

    /// Every configured source for a boundary type failed.
    #[error("no usable boundary source for {boundary}: {last_error} ({remediation})")]
    NoUsableSource {
        boundary: String,
        remediation: String,
        #[source]
        last_error: Box<BoundaryError>,
    },

    /// An overlay could not be fetched, parsed or applied.
    #[error("overlay '{overlay}' not merged: {reason}")]
    OverlayMergeFailed { overlay: String, reason: String },

    /// A feature is missing geometry fields required by an operation.
    #[error("malformed geometry: {0}")]
    MalformedGeometry(String),

    #[error("unknown boundary: {0}")]
    UnknownBoundary(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl BoundaryError {
    pub(crate) fn unavailable(source_label: &str, reason: impl ToString) -> Self {
        BoundaryError::SourceUnavailable {
            source_label: source_label.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn overlay(overlay: &str, reason: impl ToString) -> Self {
        BoundaryError::OverlayMergeFailed {
            overlay: overlay.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Actionable hint for operators, when the error carries one.
    pub fn remediation(&self) -> Option<&str> {
        match self {
            BoundaryError::NoUsableSource { remediation, .. } => Some(remediation),
            _ => None,
        }
    }

    /// `true` for errors that mean "this boundary cannot be served" rather
    /// than an internal failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BoundaryError::NoUsableSource { .. } | BoundaryError::UnknownBoundary(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BoundaryError>;
