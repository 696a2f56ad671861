use std::sync::Arc;

use crate::domain::{ClipboardSink, DialogSurface, PipelineError};
use crate::models::{Dialog, DialogAction, Labels};

/// Shows error and result dialogs and performs the copy action
#[derive(Clone)]
pub struct ResultPresenter {
    surface: Arc<dyn DialogSurface>,
    clipboard: Arc<dyn ClipboardSink>,
    labels: Labels,
}

impl ResultPresenter {
    pub fn new(
        surface: Arc<dyn DialogSurface>,
        clipboard: Arc<dyn ClipboardSink>,
        labels: Labels,
    ) -> Self {
        Self {
            surface,
            clipboard,
            labels,
        }
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub async fn present_error(&self, title: &str, message: &str) {
        let dialog = Dialog::alert(title, message, &self.labels.ok_action);
        self.surface.show(&dialog).await;
    }

    pub async fn present_failure(&self, error: &PipelineError) {
        let (title, message) = error.title_and_message(&self.labels);
        self.present_error(&title, &message).await;
    }

    /// Show the result dialog. Returns true if the payload reached the clipboard.
    pub async fn present_result(&self, title: &str, text: &str, copy_payload: &str) -> bool {
        let dialog = Dialog::copyable(
            title,
            text,
            &self.labels.copy_action,
            &self.labels.cancel_action,
        );

        match self.surface.show(&dialog).await {
            DialogAction::Copy => match self.clipboard.set_text(copy_payload) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Failed to copy scanned text: {}", e);
                    false
                }
            },
            DialogAction::Dismiss | DialogAction::Acknowledge => false,
        }
    }
}
