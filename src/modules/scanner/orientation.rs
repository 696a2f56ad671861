use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::models::CapturedImage;

/// Re-render a captured image into a fresh upright RGBA buffer.
///
/// Never fails: if the buffer cannot be allocated the original raster is
/// returned as-is.
pub fn normalize(image: CapturedImage) -> DynamicImage {
    let CapturedImage {
        bitmap,
        orientation,
    } = image;
    let (width, height) = bitmap.dimensions();

    let Some(len) = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
    else {
        tracing::warn!("Image {}x{} too large to normalize", width, height);
        return bitmap;
    };

    let mut buffer: Vec<u8> = Vec::new();
    if let Err(e) = buffer.try_reserve_exact(len) {
        tracing::warn!("Skipping orientation fix for {}x{}: {}", width, height, e);
        return bitmap;
    }
    for (_, _, pixel) in bitmap.pixels() {
        buffer.extend_from_slice(&pixel.0);
    }

    match RgbaImage::from_raw(width, height, buffer) {
        Some(canvas) => orientation.apply(DynamicImage::ImageRgba8(canvas)),
        None => bitmap,
    }
}
