//! User-facing strings for every dialog the app shows.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub error_title: String,
    pub no_camera_title: String,
    pub no_camera_message: String,
    pub no_photos_title: String,
    pub no_photos_message: String,
    pub load_failed_message: String,
    pub no_text_message: String,
    pub busy_message: String,
    pub not_initialized_message: String,
    pub scanned_text_title: String,
    pub ok_action: String,
    pub copy_action: String,
    pub cancel_action: String,
}

impl Labels {
    pub fn english() -> Self {
        Self {
            error_title: "Error".to_string(),
            no_camera_title: "No camera".to_string(),
            no_camera_message: "This device has no supported camera.".to_string(),
            no_photos_title: "No photos".to_string(),
            no_photos_message: "This device has no supported photo library.".to_string(),
            load_failed_message: "Unable to load the image.".to_string(),
            no_text_message: "No text was found. Please try again.".to_string(),
            busy_message: "A scan is already in progress.".to_string(),
            not_initialized_message: "The scanner is not ready yet.".to_string(),
            scanned_text_title: "Scanned text:".to_string(),
            ok_action: "OK".to_string(),
            copy_action: "Copy text".to_string(),
            cancel_action: "Cancel".to_string(),
        }
    }

    pub fn croatian() -> Self {
        Self {
            error_title: "Greška".to_string(),
            no_camera_title: "Nema kamere".to_string(),
            no_camera_message: "Ovaj uređaj nema podržanu kameru.".to_string(),
            no_photos_title: "Nema fotografija".to_string(),
            no_photos_message: "Ovaj uređaj nema podržane fotografije.".to_string(),
            load_failed_message: "Nije moguće učitati sliku.".to_string(),
            no_text_message: "Tekst nije pronadjen. Molimo pokušajte ponovno.".to_string(),
            busy_message: "Skeniranje je već u tijeku.".to_string(),
            not_initialized_message: "Skener još nije spreman.".to_string(),
            scanned_text_title: "Skenirani tekst:".to_string(),
            ok_action: "U redu".to_string(),
            copy_action: "Kopiraj tekst".to_string(),
            cancel_action: "Odustani".to_string(),
        }
    }

    /// Pick a label set from a locale code such as `hr`, `hr-HR` or `en_US`.
    /// Unknown locales fall back to English.
    pub fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match language.as_str() {
            "hr" => Self::croatian(),
            _ => Self::english(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}
