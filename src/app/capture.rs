use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use fltk::app::Sender;

use super::error::{AppError, Result};
use super::messages::Message;

/// Platform capture tool and the arguments it takes ahead of the output
/// path. Shells out to the usual capture tool rather than binding a
/// camera API.
fn capture_command() -> Result<Command> {
    if cfg!(target_os = "linux") {
        let mut cmd = Command::new("fswebcam");
        cmd.args(["--no-banner", "-r", "1280x720", "--png", "9"]);
        Ok(cmd)
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("imagesnap");
        cmd.args(["-w", "1"]);
        Ok(cmd)
    } else {
        Err(AppError::Capture(
            "camera capture is not supported on this platform - use Open Image instead".to_string(),
        ))
    }
}

fn temp_capture_path() -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("scanbar-capture-{}.png", stamp))
}

/// Grab one frame from the default camera into a temp file, blocking until
/// the tool exits.
pub fn capture_to_temp() -> Result<PathBuf> {
    let path = temp_capture_path();
    let mut cmd = capture_command()?;

    let output = cmd.arg(&path).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::Capture(
                "no camera tool found - install fswebcam (Linux) or imagesnap (macOS)".to_string(),
            )
        } else {
            AppError::Capture(format!("failed to launch capture tool: {}", e))
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.lines().last().unwrap_or("capture tool exited with an error");
        return Err(AppError::Capture(detail.to_string()));
    }
    if !path.exists() {
        return Err(AppError::Capture("capture tool produced no image".to_string()));
    }
    Ok(path)
}

/// Capture off the UI thread and post the outcome back through the FLTK
/// channel.
pub fn spawn_capture(sender: Sender<Message>) {
    std::thread::spawn(move || {
        let result = capture_to_temp().map_err(|e| e.to_string());
        sender.send(Message::CaptureFinished(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_capture_path_shape() {
        let path = temp_capture_path();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("scanbar-capture-"));
        assert!(name.ends_with(".png"));
        assert!(path.starts_with(std::env::temp_dir()));
    }

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[test]
    fn test_capture_command_exists_on_unix() {
        assert!(capture_command().is_ok());
    }
}
