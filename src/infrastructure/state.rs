//! Application context built once at startup

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::config::Config;
use crate::domain::{ClipboardSink, DialogSurface, ImagePicker, PipelineError, TextRecognizer};
use crate::models::Labels;
use crate::modules::integrations::cloud_vision::CloudVisionClient;
use crate::modules::scanner::{PipelineCoordinator, ResultPresenter};

/// Process-wide state shared by the FFI layer and the desktop binary
pub struct AppContext {
    pub config: Config,
    pub labels: Labels,
    /// Recognition backend
    pub recognizer: Arc<dyn TextRecognizer>,
    scan_lock: Mutex<()>,
}

impl AppContext {
    /// Create a context talking to Cloud Vision as configured
    pub fn new(config: Config) -> Self {
        let recognizer = Arc::new(CloudVisionClient::new(
            config.vision_endpoint.clone(),
            config.vision_api_key.clone(),
        ));
        Self::with_recognizer(config, recognizer)
    }

    pub fn with_recognizer(config: Config, recognizer: Arc<dyn TextRecognizer>) -> Self {
        let labels = Labels::for_locale(&config.locale);
        Self {
            config,
            labels,
            recognizer,
            scan_lock: Mutex::new(()),
        }
    }

    /// Claim the single scan slot, failing if a scan is in flight
    pub fn begin_scan(&self) -> Result<MutexGuard<'_, ()>, PipelineError> {
        self.scan_lock.try_lock().map_err(|_| PipelineError::Busy)
    }

    /// Build a coordinator wired to the given platform collaborators
    pub fn coordinator(
        &self,
        picker: Arc<dyn ImagePicker>,
        surface: Arc<dyn DialogSurface>,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> PipelineCoordinator {
        let presenter = ResultPresenter::new(surface, clipboard, self.labels.clone());
        PipelineCoordinator::new(picker, self.recognizer.clone(), presenter)
    }
}
