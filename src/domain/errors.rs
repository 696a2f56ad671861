//! Domain error types
//!
//! Every variant ends the current scan and is shown to the user as a dialog.

use std::fmt;

use crate::models::{FailureKind, ImageSource, Labels, RecognitionFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Requested capture source is not present on this device
    SourceUnavailable(ImageSource),
    /// Picker returned no usable image
    AcquisitionFailed,
    /// Recognition call failed; carries the service message verbatim
    ServiceError(String),
    /// Recognition succeeded but found nothing to show
    NoTextFound,
    /// Another scan is still in flight
    Busy,
    /// Backend used before initialization
    NotInitialized,
}

impl PipelineError {
    /// Title and body of the error dialog for this failure
    pub fn title_and_message(&self, labels: &Labels) -> (String, String) {
        match self {
            PipelineError::SourceUnavailable(ImageSource::Camera) => (
                labels.no_camera_title.clone(),
                labels.no_camera_message.clone(),
            ),
            PipelineError::SourceUnavailable(ImageSource::Library) => (
                labels.no_photos_title.clone(),
                labels.no_photos_message.clone(),
            ),
            PipelineError::AcquisitionFailed => (
                labels.error_title.clone(),
                labels.load_failed_message.clone(),
            ),
            PipelineError::ServiceError(msg) => (labels.error_title.clone(), msg.clone()),
            PipelineError::NoTextFound => {
                (labels.error_title.clone(), labels.no_text_message.clone())
            }
            PipelineError::Busy => (labels.error_title.clone(), labels.busy_message.clone()),
            PipelineError::NotInitialized => (
                labels.error_title.clone(),
                labels.not_initialized_message.clone(),
            ),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::SourceUnavailable(source) => {
                write!(f, "Image source unavailable: {}", source)
            }
            PipelineError::AcquisitionFailed => write!(f, "Image acquisition failed"),
            PipelineError::ServiceError(msg) => write!(f, "Recognition service error: {}", msg),
            PipelineError::NoTextFound => write!(f, "No text found"),
            PipelineError::Busy => write!(f, "A scan is already in progress"),
            PipelineError::NotInitialized => write!(f, "Backend not initialized"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<RecognitionFailure> for PipelineError {
    fn from(failure: RecognitionFailure) -> Self {
        match failure.kind {
            FailureKind::ServiceError => PipelineError::ServiceError(failure.message),
            FailureKind::NoTextFound => PipelineError::NoTextFound,
        }
    }
}
