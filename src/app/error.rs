use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Barcode error: {0}")]
    Barcode(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Ocr("engine not installed".to_string());
        assert_eq!(err.to_string(), "OCR error: engine not installed");

        let err = AppError::Barcode("payload too long".to_string());
        assert_eq!(err.to_string(), "Barcode error: payload too long");

        let err = AppError::Capture("no camera tool found".to_string());
        assert_eq!(err.to_string(), "Capture error: no camera tool found");
    }
}
