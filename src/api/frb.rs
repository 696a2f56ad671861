// FFI API module for flutter_rust_bridge
// This module exposes the scan pipeline to Flutter without an HTTP layer
//
// ARCHITECTURE: The Flutter shell owns the native camera/photo pickers and shows
// the dialogs. Rust receives the picked bytes, fixes orientation, runs recognition
// and describes the dialog the shell has to present.

use flutter_rust_bridge::frb;
use std::sync::OnceLock;

use crate::config::Config;
use crate::domain::PipelineError;
use crate::infrastructure::AppContext;
use crate::models::{Dialog, DialogAction, DisplayText, ImageSource, Labels, TextFragment};
use crate::modules::scanner::scan_encoded;

// Global context (initialized once on app start)
static CONTEXT: OnceLock<AppContext> = OnceLock::new();

/// Install a panic hook to prevent crashes on iOS
/// This converts panics into logs instead of aborting
fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|panic_info| {
            let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            let location = panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string());
            tracing::error!("FFI PANIC at {}: {}", location, message);
        }));
    });
}

fn context() -> Option<&'static AppContext> {
    CONTEXT.get()
}

fn labels() -> Labels {
    context().map(|ctx| ctx.labels.clone()).unwrap_or_default()
}

// ============ FFI-Compatible Data Structures ============

pub enum FrbImageSource {
    Camera,
    Library,
}

impl From<FrbImageSource> for ImageSource {
    fn from(source: FrbImageSource) -> Self {
        match source {
            FrbImageSource::Camera => ImageSource::Camera,
            FrbImageSource::Library => ImageSource::Library,
        }
    }
}

pub enum FrbDialogActionKind {
    Acknowledge,
    Copy,
    Dismiss,
}

impl From<DialogAction> for FrbDialogActionKind {
    fn from(action: DialogAction) -> Self {
        match action {
            DialogAction::Acknowledge => FrbDialogActionKind::Acknowledge,
            DialogAction::Copy => FrbDialogActionKind::Copy,
            DialogAction::Dismiss => FrbDialogActionKind::Dismiss,
        }
    }
}

#[frb(dart_metadata=("freezed"))]
pub struct FrbDialogAction {
    pub label: String,
    pub kind: FrbDialogActionKind,
}

/// Dialog the Flutter shell must present
#[frb(dart_metadata=("freezed"))]
pub struct FrbDialog {
    pub title: String,
    pub message: String,
    pub actions: Vec<FrbDialogAction>,
    /// Text for the clipboard when the copy action is chosen
    pub copy_payload: Option<String>,
    pub is_error: bool,
}

impl FrbDialog {
    fn from_dialog(dialog: Dialog, copy_payload: Option<String>, is_error: bool) -> Self {
        FrbDialog {
            title: dialog.title,
            message: dialog.message,
            actions: dialog
                .buttons
                .into_iter()
                .map(|b| FrbDialogAction {
                    label: b.label,
                    kind: b.action.into(),
                })
                .collect(),
            copy_payload,
            is_error,
        }
    }

    fn result(text: DisplayText, labels: &Labels) -> Self {
        let text = text.into_string();
        let dialog = Dialog::copyable(
            &labels.scanned_text_title,
            &text,
            &labels.copy_action,
            &labels.cancel_action,
        );
        Self::from_dialog(dialog, Some(text), false)
    }

    fn error(error: &PipelineError, labels: &Labels) -> Self {
        let (title, message) = error.title_and_message(labels);
        Self::from_dialog(Dialog::alert(&title, &message, &labels.ok_action), None, true)
    }
}

// ============ Initialization ============

/// Initialize the FFI backend. Arguments override the environment.
/// Must be called before `recognize_image`
pub async fn init_backend(
    api_key: Option<String>,
    endpoint: Option<String>,
    locale: Option<String>,
) -> Result<String, String> {
    // Install panic hook first thing to catch any panics
    install_panic_hook();

    if CONTEXT.get().is_some() {
        return Ok("Already initialized".to_string());
    }

    let mut config = Config::from_env();
    if api_key.is_some() {
        config.vision_api_key = api_key;
    }
    if let Some(endpoint) = endpoint {
        config.vision_endpoint = endpoint;
    }
    if let Some(locale) = locale {
        config.locale = locale;
    }
    tracing::info!(
        "FFI: initializing scanner (endpoint: {}, locale: {})",
        config.vision_endpoint,
        config.locale
    );

    match CONTEXT.set(AppContext::new(config)) {
        Ok(_) => Ok("Backend initialized successfully".to_string()),
        Err(_) => Err("Failed to set application context".to_string()),
    }
}

// ============ Health Check ============

/// Check if the FFI backend is healthy
#[frb(sync)]
pub fn health_check() -> String {
    if CONTEXT.get().is_some() {
        "OK".to_string()
    } else {
        "NOT_INITIALIZED".to_string()
    }
}

/// Get the FFI backend version
#[frb(sync)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ============ Scanning ============

/// Recognize text in the bytes of a picked photo.
///
/// Pipeline failures come back as an error dialog; `Err` means the backend
/// was never initialized.
pub async fn recognize_image(image_bytes: Vec<u8>) -> Result<FrbDialog, String> {
    let ctx = context().ok_or_else(|| PipelineError::NotInitialized.to_string())?;

    let _slot = match ctx.begin_scan() {
        Ok(slot) => slot,
        Err(e) => return Ok(FrbDialog::error(&e, &ctx.labels)),
    };

    tracing::info!("FFI: recognize_image received {} bytes", image_bytes.len());
    let dialog = match scan_encoded(ctx.recognizer.as_ref(), &image_bytes).await {
        Ok(text) => FrbDialog::result(text, &ctx.labels),
        Err(e) => {
            tracing::info!("FFI: scan ended: {}", e);
            FrbDialog::error(&e, &ctx.labels)
        }
    };
    Ok(dialog)
}

/// Dialog for a picker source the device does not offer
#[frb(sync)]
pub fn source_unavailable_dialog(source: FrbImageSource) -> FrbDialog {
    FrbDialog::error(&PipelineError::SourceUnavailable(source.into()), &labels())
}

/// Dialog for a picker that returned no usable image
#[frb(sync)]
pub fn acquisition_failed_dialog() -> FrbDialog {
    FrbDialog::error(&PipelineError::AcquisitionFailed, &labels())
}

/// Join fragments the same way the result dialog does
#[frb(sync)]
pub fn format_display_text(fragments: Vec<String>) -> String {
    let fragments: Vec<TextFragment> = fragments.into_iter().map(TextFragment::new).collect();
    DisplayText::from_fragments(&fragments).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_text() {
        assert_eq!(
            format_display_text(vec!["Hello".to_string(), "World".to_string()]),
            "\nHello\n\nWorld\n"
        );
        assert_eq!(format_display_text(Vec::new()), "");
    }

    #[test]
    fn test_result_dialog_carries_copy_payload() {
        let text = DisplayText::from_fragments(&[TextFragment::new("INVOICE #123")]);
        let dialog = FrbDialog::result(text, &Labels::english());

        assert!(!dialog.is_error);
        assert_eq!(dialog.title, "Scanned text:");
        assert_eq!(dialog.message, "\nINVOICE #123\n");
        assert_eq!(dialog.copy_payload.as_deref(), Some("\nINVOICE #123\n"));
        assert_eq!(dialog.actions.len(), 2);
        assert!(matches!(dialog.actions[0].kind, FrbDialogActionKind::Copy));
        assert!(matches!(dialog.actions[1].kind, FrbDialogActionKind::Dismiss));
    }

    #[test]
    fn test_error_dialog_has_no_payload() {
        let err = PipelineError::ServiceError("network unreachable".to_string());
        let dialog = FrbDialog::error(&err, &Labels::english());

        assert!(dialog.is_error);
        assert_eq!(dialog.message, "network unreachable");
        assert!(dialog.copy_payload.is_none());
        assert_eq!(dialog.actions.len(), 1);
        assert!(matches!(
            dialog.actions[0].kind,
            FrbDialogActionKind::Acknowledge
        ));
    }

    #[test]
    fn test_unavailable_camera_dialog() {
        let dialog = source_unavailable_dialog(FrbImageSource::Camera);
        assert!(dialog.is_error);
        assert_eq!(dialog.title, Labels::default().no_camera_title);
    }
}
