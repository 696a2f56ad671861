pub mod captured_image;
pub mod dialog;
pub mod labels;
pub mod outcome;

pub use captured_image::{CapturedImage, ImageSource, Orientation, PickerInfo, PickerResponse};
pub use dialog::{Dialog, DialogAction, DialogButton};
pub use labels::Labels;
pub use outcome::{DisplayText, FailureKind, RecognitionFailure, RecognitionOutcome, TextFragment};
