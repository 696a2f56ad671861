//! Capture-to-text pipeline
//!
//! `Idle -> Acquiring -> Normalizing -> Recognizing -> Presenting -> Idle`,
//! with early exits on cancellation and on errors. `capture` borrows the
//! coordinator mutably, so only one run can be in flight.

use std::fmt;
use std::sync::Arc;

use super::acquisition::request_image;
use super::orientation::normalize;
use super::presenter::ResultPresenter;
use crate::domain::{ImagePicker, PipelineError, TextRecognizer};
use crate::models::{CapturedImage, DisplayText, ImageSource, RecognitionOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Acquiring,
    Normalizing,
    Recognizing,
    Presenting,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Acquiring => "acquiring",
            PipelineState::Normalizing => "normalizing",
            PipelineState::Recognizing => "recognizing",
            PipelineState::Presenting => "presenting",
        };
        f.write_str(name)
    }
}

/// How a single capture ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineRun {
    /// User backed out of the picker, nothing was shown
    Cancelled,
    /// An error dialog was shown
    Failed(PipelineError),
    /// The result dialog was shown
    Presented { text: String, copied: bool },
}

/// Turn a recognition outcome into the text to display.
///
/// A success with no fragments is treated the same as `NoTextFound`.
pub fn resolve_outcome(outcome: RecognitionOutcome) -> Result<DisplayText, PipelineError> {
    match outcome {
        RecognitionOutcome::Success(fragments) if !fragments.is_empty() => {
            Ok(DisplayText::from_fragments(&fragments))
        }
        RecognitionOutcome::Success(_) => Err(PipelineError::NoTextFound),
        RecognitionOutcome::Failure(failure) => Err(failure.into()),
    }
}

/// Decode, normalize and recognize already-picked image bytes.
///
/// Used where the platform shell owns the picker and dialogs (FFI).
pub async fn scan_encoded(
    recognizer: &dyn TextRecognizer,
    bytes: &[u8],
) -> Result<DisplayText, PipelineError> {
    let captured = CapturedImage::decode(bytes).map_err(|e| {
        tracing::debug!("Rejecting image bytes: {}", e);
        PipelineError::AcquisitionFailed
    })?;
    let upright = normalize(captured);
    resolve_outcome(recognizer.detect_text(&upright).await)
}

pub struct PipelineCoordinator {
    picker: Arc<dyn ImagePicker>,
    recognizer: Arc<dyn TextRecognizer>,
    presenter: ResultPresenter,
    state: PipelineState,
}

impl PipelineCoordinator {
    pub fn new(
        picker: Arc<dyn ImagePicker>,
        recognizer: Arc<dyn TextRecognizer>,
        presenter: ResultPresenter,
    ) -> Self {
        Self {
            picker,
            recognizer,
            presenter,
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run one capture from user tap to dismissed dialog
    pub async fn capture(&mut self, source: ImageSource) -> PipelineRun {
        self.transition(PipelineState::Acquiring);
        let run = self.run(source).await;
        self.transition(PipelineState::Idle);

        match &run {
            PipelineRun::Cancelled => tracing::info!("Scan from {} cancelled", source),
            PipelineRun::Failed(e) => tracing::info!("Scan from {} ended: {}", source, e),
            PipelineRun::Presented { text, copied } => tracing::info!(
                "Scan from {} presented {} chars (copied: {})",
                source,
                text.len(),
                copied
            ),
        }
        run
    }

    async fn run(&mut self, source: ImageSource) -> PipelineRun {
        let captured = match request_image(self.picker.as_ref(), source).await {
            Ok(Some(captured)) => captured,
            Ok(None) => return PipelineRun::Cancelled,
            Err(e) => return self.fail(e).await,
        };

        self.transition(PipelineState::Normalizing);
        let upright = normalize(captured);

        self.transition(PipelineState::Recognizing);
        let outcome = self.recognizer.detect_text(&upright).await;
        drop(upright);

        match resolve_outcome(outcome) {
            Ok(text) => {
                self.transition(PipelineState::Presenting);
                let title = self.presenter.labels().scanned_text_title.clone();
                let copied = self
                    .presenter
                    .present_result(&title, text.as_str(), text.as_str())
                    .await;
                PipelineRun::Presented {
                    text: text.into_string(),
                    copied,
                }
            }
            Err(e) => self.fail(e).await,
        }
    }

    async fn fail(&mut self, error: PipelineError) -> PipelineRun {
        self.transition(PipelineState::Presenting);
        self.presenter.present_failure(&error).await;
        PipelineRun::Failed(error)
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::debug!("Pipeline {} -> {}", self.state, next);
        self.state = next;
    }
}
