use image::DynamicImage;
use std::fmt;
use std::io::Cursor;

/// Where a photo comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSource {
    Camera,
    Library,
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Camera => write!(f, "camera"),
            ImageSource::Library => write!(f, "library"),
        }
    }
}

/// Stored orientation of a bitmap, as recorded in EXIF tag 0x0112.
///
/// The variant names describe the transform needed to display the raster
/// upright: `Right` means the raster must be turned 90 degrees clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

impl Orientation {
    /// Map an EXIF orientation value. Out-of-range values are treated as upright.
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Orientation::UpMirrored,
            3 => Orientation::Down,
            4 => Orientation::DownMirrored,
            5 => Orientation::LeftMirrored,
            6 => Orientation::Right,
            7 => Orientation::RightMirrored,
            8 => Orientation::Left,
            _ => Orientation::Up,
        }
    }

    /// True when displaying the raster upright swaps width and height
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::LeftMirrored
                | Orientation::Right
                | Orientation::RightMirrored
                | Orientation::Left
        )
    }

    /// Apply the transform that turns a raster with this orientation upright
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Up => img,
            Orientation::UpMirrored => img.fliph(),
            Orientation::Down => img.rotate180(),
            Orientation::DownMirrored => img.flipv(),
            Orientation::LeftMirrored => img.rotate90().fliph(),
            Orientation::Right => img.rotate90(),
            Orientation::RightMirrored => img.rotate270().fliph(),
            Orientation::Left => img.rotate270(),
        }
    }
}

/// What a platform picker hands back. Only `original_image` is consumed.
#[derive(Debug, Clone, Default)]
pub struct PickerInfo {
    pub original_image: Option<Vec<u8>>,
}

impl PickerInfo {
    pub fn original(bytes: Vec<u8>) -> Self {
        Self {
            original_image: Some(bytes),
        }
    }
}

#[derive(Debug, Clone)]
pub enum PickerResponse {
    Picked(PickerInfo),
    Cancelled,
}

/// A picked photo: the decoded raster plus the orientation it was stored with
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub bitmap: DynamicImage,
    pub orientation: Orientation,
}

impl CapturedImage {
    pub fn new(bitmap: DynamicImage, orientation: Orientation) -> Self {
        Self {
            bitmap,
            orientation,
        }
    }

    /// Decode encoded image bytes (JPEG or PNG) and read their EXIF orientation
    pub fn decode(bytes: &[u8]) -> Result<Self, String> {
        let bitmap =
            image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;
        let orientation = Orientation::from_exif(read_exif_orientation(bytes));

        Ok(Self {
            bitmap,
            orientation,
        })
    }

    /// Width and height once the image is shown upright
    pub fn display_dimensions(&self) -> (u32, u32) {
        let (width, height) = (self.bitmap.width(), self.bitmap.height());
        if self.orientation.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Read the EXIF orientation tag from encoded image bytes.
/// Returns 1 (normal) if there is no EXIF data or the tag is missing.
pub fn read_exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    let reader = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(r) => r,
        Err(_) => return 1,
    };

    reader
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 10, 10])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_png_without_exif_is_upright() {
        let captured = CapturedImage::decode(&encoded_png(12, 7)).unwrap();
        assert_eq!(captured.orientation, Orientation::Up);
        assert_eq!(captured.display_dimensions(), (12, 7));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = CapturedImage::decode(b"definitely not an image").unwrap_err();
        assert!(err.starts_with("Failed to decode image"));
    }

    #[test]
    fn test_exif_mapping() {
        assert_eq!(Orientation::from_exif(1), Orientation::Up);
        assert_eq!(Orientation::from_exif(6), Orientation::Right);
        assert_eq!(Orientation::from_exif(8), Orientation::Left);
        assert_eq!(Orientation::from_exif(0), Orientation::Up);
        assert_eq!(Orientation::from_exif(42), Orientation::Up);
    }

    #[test]
    fn test_display_dimensions_swap_for_quarter_turns() {
        let bitmap = DynamicImage::ImageRgb8(RgbImage::new(30, 10));
        let captured = CapturedImage::new(bitmap, Orientation::Right);
        assert_eq!(captured.display_dimensions(), (10, 30));
    }
}
