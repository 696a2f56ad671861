//! Google Cloud Vision `TEXT_DETECTION` client

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::domain::TextRecognizer;
use crate::models::{RecognitionOutcome, TextFragment};

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com";

/// Largest JPEG sent to the service. Base64 grows it by a third, which keeps
/// the JSON body under the 10 MB request limit.
const MAX_JPEG_BYTES: usize = 6 * 1024 * 1024;
const JPEG_QUALITY: u8 = 85;
const MAX_DOWNSCALE_STEPS: usize = 6;

// ============ Request ============

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: RequestImage,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct RequestImage {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

// ============ Response ============

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    text_annotations: Vec<EntityAnnotation>,
    full_text_annotation: Option<FullTextAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct FullTextAnnotation {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(default)]
    paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Deserialize)]
struct Paragraph {
    #[serde(default)]
    words: Vec<Word>,
}

#[derive(Debug, Deserialize)]
struct Word {
    #[serde(default)]
    symbols: Vec<Symbol>,
}

#[derive(Debug, Deserialize)]
struct Symbol {
    #[serde(default)]
    text: String,
    property: Option<TextProperty>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextProperty {
    detected_break: Option<DetectedBreak>,
}

#[derive(Debug, Deserialize)]
struct DetectedBreak {
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl Status {
    fn into_message(self) -> String {
        if self.message.trim().is_empty() {
            format!("Cloud Vision API returned error code: {}", self.code)
        } else {
            self.message
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Status,
}

// ============ Client ============

pub struct CloudVisionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl CloudVisionClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    fn annotate_url(&self) -> String {
        format!("{}/v1/images:annotate", self.endpoint.trim_end_matches('/'))
    }

    /// One `images:annotate` round trip. Errors carry the service message.
    async fn annotate(&self, image: &DynamicImage) -> Result<Vec<TextFragment>, String> {
        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: RequestImage {
                    content: encode_jpeg_base64(image)?,
                },
                features: vec![Feature {
                    kind: "TEXT_DETECTION",
                }],
            }],
        };

        let mut request = self.client.post(self.annotate_url()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("X-Goog-Api-Key", key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("Failed to read response body: {}", e))?;

        if !status.is_success() {
            return Err(serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .map(|envelope| envelope.error.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("Cloud Vision API returned status: {}", status)));
        }

        let parsed: AnnotateResponse =
            serde_json::from_str(&text).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        match parsed.responses.into_iter().next() {
            Some(response) => match response.error {
                Some(error) => Err(error.into_message()),
                None => Ok(extract_fragments(response)),
            },
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl TextRecognizer for CloudVisionClient {
    async fn detect_text(&self, image: &DynamicImage) -> RecognitionOutcome {
        tracing::debug!(
            "Sending {}x{} image to {}",
            image.width(),
            image.height(),
            self.endpoint
        );

        match self.annotate(image).await {
            Ok(fragments) => {
                tracing::debug!("Cloud Vision returned {} blocks", fragments.len());
                RecognitionOutcome::from_fragments(fragments)
            }
            Err(e) => RecognitionOutcome::service_error(e),
        }
    }
}

/// Flatten to RGB and encode as JPEG, halving the pixel budget until the
/// result fits `MAX_JPEG_BYTES`.
fn encode_jpeg_base64(image: &DynamicImage) -> Result<String, String> {
    let mut rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut jpeg = encode_jpeg(&rgb)?;

    for _ in 0..MAX_DOWNSCALE_STEPS {
        if jpeg.len() <= MAX_JPEG_BYTES {
            break;
        }
        let (width, height) = (rgb.width(), rgb.height());
        let (new_width, new_height) = (
            (width as f64 / std::f64::consts::SQRT_2) as u32,
            (height as f64 / std::f64::consts::SQRT_2) as u32,
        );
        if new_width == 0 || new_height == 0 {
            break;
        }
        tracing::debug!(
            "JPEG of {} bytes too large, downscaling {}x{} to {}x{}",
            jpeg.len(),
            width,
            height,
            new_width,
            new_height
        );
        rgb = rgb.resize(new_width, new_height, FilterType::Triangle);
        jpeg = encode_jpeg(&rgb)?;
    }

    Ok(STANDARD.encode(jpeg))
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, String> {
    let mut jpeg = Vec::new();
    image
        .write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY))
        .map_err(|e| format!("Failed to encode image: {}", e))?;
    Ok(jpeg)
}

/// Block texts in reading order, falling back to the full-text entity
fn extract_fragments(response: AnnotateImageResponse) -> Vec<TextFragment> {
    if let Some(full) = response.full_text_annotation {
        let blocks: Vec<TextFragment> = full
            .pages
            .iter()
            .flat_map(|page| page.blocks.iter())
            .map(block_text)
            .filter(|text| !text.is_empty())
            .map(TextFragment::new)
            .collect();

        if !blocks.is_empty() {
            return blocks;
        }
    }

    response
        .text_annotations
        .into_iter()
        .next()
        .map(|entity| entity.description.trim().to_string())
        .filter(|text| !text.is_empty())
        .map(|text| vec![TextFragment::new(text)])
        .unwrap_or_default()
}

fn block_text(block: &Block) -> String {
    let mut text = String::new();
    for symbol in block
        .paragraphs
        .iter()
        .flat_map(|p| p.words.iter())
        .flat_map(|w| w.symbols.iter())
    {
        text.push_str(&symbol.text);
        let kind = symbol
            .property
            .as_ref()
            .and_then(|p| p.detected_break.as_ref())
            .map(|b| b.kind.as_str());
        match kind {
            Some("SPACE") | Some("SURE_SPACE") => text.push(' '),
            Some("EOL_SURE_SPACE") | Some("LINE_BREAK") => text.push('\n'),
            Some("HYPHEN") => text.push_str("-\n"),
            _ => {}
        }
    }
    text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> AnnotateImageResponse {
        serde_json::from_value(json).unwrap()
    }

    fn symbol(text: &str, brk: Option<&str>) -> serde_json::Value {
        match brk {
            Some(kind) => serde_json::json!({
                "text": text,
                "property": { "detectedBreak": { "type": kind } }
            }),
            None => serde_json::json!({ "text": text }),
        }
    }

    #[test]
    fn test_blocks_are_rebuilt_from_symbols() {
        let response = parse(serde_json::json!({
            "fullTextAnnotation": {
                "pages": [{
                    "blocks": [
                        { "paragraphs": [{ "words": [
                            { "symbols": [symbol("H", None), symbol("i", Some("SPACE"))] },
                            { "symbols": [symbol("y", None), symbol("o", Some("EOL_SURE_SPACE"))] },
                            { "symbols": [symbol("n", None), symbol("e", Some("HYPHEN"))] },
                            { "symbols": [symbol("x", None), symbol("t", Some("LINE_BREAK"))] }
                        ]}]},
                        { "paragraphs": [{ "words": [
                            { "symbols": [symbol("2", Some("LINE_BREAK"))] }
                        ]}]}
                    ]
                }]
            }
        }));

        let fragments = extract_fragments(response);
        assert_eq!(
            fragments,
            vec![TextFragment::new("Hi yo\nne-\nxt"), TextFragment::new("2")]
        );
    }

    #[test]
    fn test_falls_back_to_first_text_annotation() {
        let response = parse(serde_json::json!({
            "textAnnotations": [
                { "description": "INVOICE #123\n" },
                { "description": "INVOICE" }
            ]
        }));
        assert_eq!(
            extract_fragments(response),
            vec![TextFragment::new("INVOICE #123")]
        );
    }

    #[test]
    fn test_empty_response_has_no_fragments() {
        assert!(extract_fragments(parse(serde_json::json!({}))).is_empty());

        let blank_blocks = parse(serde_json::json!({
            "fullTextAnnotation": { "pages": [{ "blocks": [{ "paragraphs": [] }] }] }
        }));
        assert!(extract_fragments(blank_blocks).is_empty());
    }

    #[test]
    fn test_status_without_message_falls_back_to_code() {
        let status: Status = serde_json::from_value(serde_json::json!({ "code": 13 })).unwrap();
        assert_eq!(
            status.into_message(),
            "Cloud Vision API returned error code: 13"
        );

        let status: Status =
            serde_json::from_value(serde_json::json!({ "code": 3, "message": "Bad image data." }))
                .unwrap();
        assert_eq!(status.into_message(), "Bad image data.");
    }

    /// Gradient with deterministic noise, compresses roughly like a camera photo
    fn photo_like(width: u32, height: u32) -> DynamicImage {
        let mut seed: u32 = 0x2545_f491;
        let raster = image::RgbImage::from_fn(width, height, |x, y| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let noise = (seed >> 24) as i32 % 17 - 8;
            let base = ((x * 255 / width.max(1)) as i32 + (y * 255 / height.max(1)) as i32) / 2;
            let v = (base + noise).clamp(0, 255) as u8;
            image::Rgb([v, v.wrapping_add(40), 255 - v])
        });
        DynamicImage::ImageRgb8(raster)
    }

    #[test]
    fn test_camera_sized_photo_fits_request_limit() {
        let payload = encode_jpeg_base64(&photo_like(4032, 3024)).unwrap();
        assert!(
            payload.len() < 10 * 1024 * 1024,
            "payload was {} bytes",
            payload.len()
        );
        // base64 of the JPEG SOI marker
        assert!(payload.starts_with("/9j/"));
    }

    #[test]
    fn test_oversized_jpeg_is_downscaled() {
        let payload = encode_jpeg_base64(&photo_like(6000, 6000)).unwrap();
        let jpeg = STANDARD.decode(&payload).unwrap();
        assert!(jpeg.len() <= MAX_JPEG_BYTES);
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert!(decoded.width() <= 6000);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn test_annotate_url_trims_trailing_slash() {
        let client = CloudVisionClient::new("http://localhost:9000/", None);
        assert_eq!(
            client.annotate_url(),
            "http://localhost:9000/v1/images:annotate"
        );
    }
}
