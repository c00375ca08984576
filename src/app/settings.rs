use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::barcode::BarcodeOptions;
use super::error::AppError;
use super::updater::UpdateChannel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Recognition language passed to the OCR engine (`-l`), e.g. "eng".
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// Width of a single barcode module in pixels.
    #[serde(default = "default_module_width")]
    pub barcode_module_width: u32,

    /// Bar height in pixels.
    #[serde(default = "default_barcode_height")]
    pub barcode_height: u32,

    #[serde(default = "default_auto_check_updates")]
    pub auto_check_updates: bool,

    #[serde(default = "default_update_channel")]
    pub update_channel: UpdateChannel,

    #[serde(default)]
    pub last_update_check: i64,

    #[serde(default)]
    pub skipped_versions: Vec<String>,
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_module_width() -> u32 {
    2
}

fn default_barcode_height() -> u32 {
    80
}

fn default_auto_check_updates() -> bool {
    true
}

fn default_update_channel() -> UpdateChannel {
    UpdateChannel::Stable
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ocr_language: default_ocr_language(),
            barcode_module_width: default_module_width(),
            barcode_height: default_barcode_height(),
            auto_check_updates: default_auto_check_updates(),
            update_channel: default_update_channel(),
            last_update_check: 0,
            skipped_versions: Vec::new(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                let _ = default.save();
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::get_config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("scanbar");
        path.push("settings.json");
        path
    }

    pub fn barcode_options(&self) -> BarcodeOptions {
        BarcodeOptions {
            module_width: self.barcode_module_width.clamp(1, 8),
            height: self.barcode_height.clamp(20, 400),
            ..BarcodeOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.ocr_language, "eng");
        assert_eq!(settings.barcode_module_width, 2);
        assert_eq!(settings.barcode_height, 80);
        assert!(settings.auto_check_updates);
        assert_eq!(settings.update_channel, UpdateChannel::Stable);
        assert_eq!(settings.last_update_check, 0);
        assert!(settings.skipped_versions.is_empty());
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        // Simulate old config missing new fields
        let json = r#"{"ocr_language": "deu"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.ocr_language, "deu"); // Should use file value
        assert_eq!(settings.barcode_height, 80); // Should use default
        assert!(settings.auto_check_updates);
    }

    #[test]
    fn test_update_settings_serialization() {
        let settings = AppSettings {
            auto_check_updates: false,
            update_channel: UpdateChannel::Beta,
            last_update_check: 1234567890,
            skipped_versions: vec!["0.3.0".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();

        assert!(!loaded.auto_check_updates);
        assert_eq!(loaded.update_channel, UpdateChannel::Beta);
        assert_eq!(loaded.last_update_check, 1234567890);
        assert_eq!(loaded.skipped_versions, vec!["0.3.0".to_string()]);
    }

    #[test]
    fn test_barcode_options_clamped() {
        let settings = AppSettings {
            barcode_module_width: 50,
            barcode_height: 5,
            ..Default::default()
        };
        let options = settings.barcode_options();
        assert_eq!(options.module_width, 8);
        assert_eq!(options.height, 20);
    }

    #[test]
    fn test_backward_compatibility() {
        // Old config without update fields should use defaults
        let json = r#"{
            "ocr_language": "fra",
            "barcode_module_width": 3,
            "barcode_height": 120
        }"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();

        // Old fields preserved
        assert_eq!(settings.ocr_language, "fra");
        assert_eq!(settings.barcode_module_width, 3);

        // New fields use defaults
        assert!(settings.auto_check_updates);
        assert_eq!(settings.update_channel, UpdateChannel::Stable);
        assert!(settings.skipped_versions.is_empty());
    }
}
