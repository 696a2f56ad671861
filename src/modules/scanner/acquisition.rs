use crate::domain::{ImagePicker, PipelineError};
use crate::models::{CapturedImage, ImageSource, PickerResponse};

/// Ask the platform picker for one photo.
///
/// `Ok(None)` means the user cancelled. An unavailable source fails before
/// any picker is shown.
pub async fn request_image(
    picker: &dyn ImagePicker,
    source: ImageSource,
) -> Result<Option<CapturedImage>, PipelineError> {
    if !picker.is_available(source) {
        tracing::debug!("Image source {} is not available", source);
        return Err(PipelineError::SourceUnavailable(source));
    }

    let info = match picker.pick(source).await {
        Ok(PickerResponse::Picked(info)) => info,
        Ok(PickerResponse::Cancelled) => {
            tracing::debug!("Picker for {} cancelled", source);
            return Ok(None);
        }
        Err(e) => {
            tracing::debug!("Picker for {} failed: {}", source, e);
            return Err(PipelineError::AcquisitionFailed);
        }
    };

    let bytes = info
        .original_image
        .ok_or(PipelineError::AcquisitionFailed)?;

    CapturedImage::decode(&bytes).map(Some).map_err(|e| {
        tracing::debug!("Picked image from {} is unusable: {}", source, e);
        PipelineError::AcquisitionFailed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PickerInfo;
    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPicker {
        available: bool,
        response: Result<PickerResponse, String>,
        picks: AtomicUsize,
    }

    impl StubPicker {
        fn new(available: bool, response: Result<PickerResponse, String>) -> Self {
            Self {
                available,
                response,
                picks: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ImagePicker for StubPicker {
        fn is_available(&self, _source: ImageSource) -> bool {
            self.available
        }

        async fn pick(&self, _source: ImageSource) -> Result<PickerResponse, String> {
            self.picks.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([1, 2, 3])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn test_unavailable_source_never_picks() {
        for source in [ImageSource::Camera, ImageSource::Library] {
            let picker = StubPicker::new(false, Ok(PickerResponse::Cancelled));
            let result = request_image(&picker, source).await;
            assert_eq!(result.unwrap_err(), PipelineError::SourceUnavailable(source));
            assert_eq!(picker.picks.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_cancel_is_silent() {
        let picker = StubPicker::new(true, Ok(PickerResponse::Cancelled));
        let result = request_image(&picker, ImageSource::Library).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_missing_original_image_fails() {
        let picker = StubPicker::new(true, Ok(PickerResponse::Picked(PickerInfo::default())));
        let result = request_image(&picker, ImageSource::Library).await;
        assert_eq!(result.unwrap_err(), PipelineError::AcquisitionFailed);
    }

    #[tokio::test]
    async fn test_picker_error_is_acquisition_failure() {
        let picker = StubPicker::new(true, Err("device busy".to_string()));
        let result = request_image(&picker, ImageSource::Camera).await;
        assert_eq!(result.unwrap_err(), PipelineError::AcquisitionFailed);
    }

    #[tokio::test]
    async fn test_picked_image_is_decoded() {
        let picker = StubPicker::new(
            true,
            Ok(PickerResponse::Picked(PickerInfo::original(png_bytes()))),
        );
        let captured = request_image(&picker, ImageSource::Camera)
            .await
            .unwrap()
            .expect("image expected");
        assert_eq!(captured.bitmap.width(), 4);
        assert_eq!(captured.bitmap.height(), 3);
        assert_eq!(picker.picks.load(Ordering::SeqCst), 1);
    }
}
