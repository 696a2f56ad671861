use std::env;

use crate::modules::integrations::cloud_vision::DEFAULT_ENDPOINT;

#[derive(Clone, Debug)]
pub struct Config {
    pub vision_api_key: Option<String>,
    pub vision_endpoint: String,
    /// Program and arguments used to take a photo on desktop
    pub camera_command: Option<Vec<String>>,
    pub locale: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            vision_api_key: env::var("TEXTDETECT_VISION_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            vision_endpoint: env::var("TEXTDETECT_VISION_ENDPOINT")
                .ok()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            camera_command: env::var("TEXTDETECT_CAMERA_COMMAND")
                .ok()
                .map(|s| s.split_whitespace().map(str::to_string).collect::<Vec<_>>())
                .filter(|parts| !parts.is_empty()),
            locale: env::var("TEXTDETECT_LOCALE").unwrap_or_else(|_| "en".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision_api_key: None,
            vision_endpoint: DEFAULT_ENDPOINT.to_string(),
            camera_command: None,
            locale: "en".to_string(),
        }
    }
}
