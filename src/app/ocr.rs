use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use fltk::app::Sender;
use regex_lite::Regex;

use super::error::{AppError, Result};
use super::messages::Message;

/// Recognition is delegated entirely to the `tesseract` executable; this
/// wrapper owns the invocation, error mapping and output cleanup.
pub struct OcrEngine {
    language: String,
}

impl OcrEngine {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Probe the installed engine and return its version, e.g. "5.3.4".
    /// Used by the About dialog and as a cheap availability check.
    pub fn engine_version() -> Result<String> {
        let output = Command::new("tesseract")
            .arg("--version")
            .output()
            .map_err(map_spawn_error)?;

        // tesseract prints its banner on stderr on some builds, stdout on others
        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).to_string()
        } else {
            String::from_utf8_lossy(&output.stdout).to_string()
        };
        parse_version_banner(&banner)
            .ok_or_else(|| AppError::Ocr("could not parse engine version".to_string()))
    }

    /// Run recognition on one image, blocking until the engine exits.
    pub fn recognize(&self, image: &Path) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(map_spawn_error)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.lines().last().unwrap_or("engine exited with an error");
            return Err(AppError::Ocr(detail.to_string()));
        }

        let raw = String::from_utf8_lossy(&output.stdout).to_string();
        Ok(normalize_output(&raw))
    }
}

fn map_spawn_error(e: std::io::Error) -> AppError {
    if e.kind() == ErrorKind::NotFound {
        AppError::Ocr(
            "tesseract not found - install it (e.g. `apt install tesseract-ocr`) and try again"
                .to_string(),
        )
    } else {
        AppError::Ocr(format!("failed to launch tesseract: {}", e))
    }
}

/// Pull "x.y.z" out of the engine's version banner.
fn parse_version_banner(banner: &str) -> Option<String> {
    let re = Regex::new(r"tesseract v?(\d+\.\d+(?:\.\d+)?)").ok()?;
    re.captures(banner).map(|c| c[1].to_string())
}

/// Clean up raw engine output: trim every line, drop empty ones, keep the
/// remaining line structure. An empty result is a valid outcome (no text in
/// the image), not an error.
pub fn normalize_output(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run recognition off the UI thread and post the outcome back through the
/// FLTK channel.
pub fn spawn_recognition(sender: Sender<Message>, language: String, image: PathBuf) {
    std::thread::spawn(move || {
        let engine = OcrEngine::new(&language);
        let result = engine.recognize(&image).map_err(|e| e.to_string());
        sender.send(Message::OcrFinished(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_empty_lines() {
        let raw = "  ITEM 12345  \n\n\n   SHELF B  \n";
        assert_eq!(normalize_output(raw), "ITEM 12345\nSHELF B");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_output(""), "");
        assert_eq!(normalize_output("\n \n\t\n"), "");
    }

    #[test]
    fn test_parse_version_banner() {
        assert_eq!(
            parse_version_banner("tesseract 5.3.4\n leptonica-1.82.0").as_deref(),
            Some("5.3.4")
        );
        assert_eq!(
            parse_version_banner("tesseract v4.1.1").as_deref(),
            Some("4.1.1")
        );
        assert_eq!(parse_version_banner("not the droid"), None);
    }

    #[test]
    fn test_missing_engine_maps_to_friendly_error() {
        let err = map_spawn_error(std::io::Error::new(ErrorKind::NotFound, "nope"));
        assert!(err.to_string().contains("tesseract not found"));
    }
}
