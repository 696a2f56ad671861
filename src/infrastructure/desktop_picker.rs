//! Desktop stand-in for the platform camera and photo pickers
//!
//! The camera is an external capture command (e.g. `fswebcam --no-banner`)
//! that receives the output path as its last argument. The photo library is
//! a file path, given up front or typed at a prompt.

use async_trait::async_trait;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tokio::process::Command;

use crate::domain::ImagePicker;
use crate::models::{ImageSource, PickerInfo, PickerResponse};

pub struct DesktopPicker {
    camera_command: Option<Vec<String>>,
    photo_path: Option<PathBuf>,
}

impl DesktopPicker {
    pub fn new(camera_command: Option<Vec<String>>, photo_path: Option<PathBuf>) -> Self {
        Self {
            camera_command,
            photo_path,
        }
    }

    async fn capture(&self, command: &[String]) -> Result<PickerResponse, String> {
        let (program, args) = command
            .split_first()
            .ok_or("Camera command is empty")?;
        let output_path =
            std::env::temp_dir().join(format!("textdetect_capture_{}.jpg", uuid::Uuid::new_v4()));

        let output = Command::new(program)
            .args(args)
            .arg(&output_path)
            .output()
            .await
            .map_err(|e| format!("Failed to execute {}: {}", program, e));

        let result = match output {
            Ok(output) if output.status.success() => match tokio::fs::read(&output_path).await {
                Ok(bytes) => Ok(PickerResponse::Picked(PickerInfo::original(bytes))),
                // Capture tool exited cleanly without a photo
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PickerResponse::Cancelled),
                Err(e) => Err(format!("Failed to read captured photo: {}", e)),
            },
            Ok(output) => Err(format!(
                "{} failed: {}",
                program,
                String::from_utf8_lossy(&output.stderr).trim()
            )),
            Err(e) => Err(e),
        };

        let _ = tokio::fs::remove_file(&output_path).await;
        result
    }

    async fn choose_photo(&self) -> Result<PickerResponse, String> {
        let path = match &self.photo_path {
            Some(path) => path.clone(),
            None => match prompt_for_path().await? {
                Some(path) => path,
                None => return Ok(PickerResponse::Cancelled),
            },
        };

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Ok(PickerResponse::Picked(PickerInfo::original(bytes)))
    }
}

#[async_trait]
impl ImagePicker for DesktopPicker {
    fn is_available(&self, source: ImageSource) -> bool {
        match source {
            ImageSource::Camera => self.camera_command.is_some(),
            ImageSource::Library => true,
        }
    }

    async fn pick(&self, source: ImageSource) -> Result<PickerResponse, String> {
        match source {
            ImageSource::Camera => match &self.camera_command {
                Some(command) => self.capture(command).await,
                None => Err("No camera command configured".to_string()),
            },
            ImageSource::Library => self.choose_photo().await,
        }
    }
}

/// Ask for a photo path on stdin. An empty answer cancels.
async fn prompt_for_path() -> Result<Option<PathBuf>, String> {
    tokio::task::spawn_blocking(|| -> Result<Option<PathBuf>, String> {
        eprint!("Path to photo (empty to cancel): ");
        let _ = std::io::stderr().flush();

        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read path: {}", e))?;

        let trimmed = line.trim();
        Ok((!trimmed.is_empty()).then(|| PathBuf::from(trimmed)))
    })
    .await
    .map_err(|e| format!("Prompt task failed: {}", e))?
}
