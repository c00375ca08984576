use std::path::PathBuf;

use super::updater::ReleaseInfo;

/// All messages that can be sent through the FLTK channel.
/// Toolbar buttons, menu callbacks and background threads send these; the
/// dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // Source image
    OpenImage,
    CaptureImage,
    CaptureFinished(Result<PathBuf, String>),
    ClearWorkspace,

    // Recognition
    RecognizeText,
    OcrFinished(Result<String, String>),

    // Recognized text / barcode
    TextEdited,
    CopyText,
    ExportBarcode,

    // View
    ToggleDarkMode,

    // Settings & Help
    OpenSettings,
    ShowAbout,
    CheckForUpdates,

    // Background updates
    BackgroundUpdateResult(Option<ReleaseInfo>),
    ShowBannerUpdate,
    DismissBanner,

    FileQuit,
    WindowClose,
}
