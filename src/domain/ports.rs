//! Collaborator trait definitions
//!
//! These traits define the contract for everything the scan pipeline talks to.
//! Implementations live in the infrastructure and integrations layers.

use async_trait::async_trait;
use image::DynamicImage;

use crate::models::{Dialog, DialogAction, ImageSource, PickerResponse, RecognitionOutcome};

/// Platform camera / photo library picker
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Whether the device offers this source at all
    fn is_available(&self, source: ImageSource) -> bool;

    /// Present the picker and wait for the user
    async fn pick(&self, source: ImageSource) -> Result<PickerResponse, String>;
}

/// Remote text recognition service
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Exactly one outcome per call, no retry
    async fn detect_text(&self, image: &DynamicImage) -> RecognitionOutcome;
}

/// Somewhere a modal dialog can be shown
#[async_trait]
pub trait DialogSurface: Send + Sync {
    /// Show the dialog and return the button the user chose
    async fn show(&self, dialog: &Dialog) -> DialogAction;
}

/// Write-only system clipboard
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), String>;
}
