use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpdateChannel {
    Stable,
    Beta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub name: String,
    #[serde(default)]
    pub body: String,
    pub html_url: String,
    pub published_at: String,
    pub prerelease: bool,
}

impl ReleaseInfo {
    /// Get the version string (tag_name without 'v' prefix)
    pub fn version(&self) -> String {
        self.tag_name.trim_start_matches('v').to_string()
    }
}

#[derive(Debug, Clone)]
pub enum UpdateCheckResult {
    NoUpdate,
    UpdateAvailable(ReleaseInfo),
    Error(String),
}

/// Compare two semantic versions
/// Returns true if remote is newer than current
pub fn is_newer_version(current: &str, remote: &str) -> bool {
    match (semver::Version::parse(current), semver::Version::parse(remote)) {
        (Ok(curr), Ok(rem)) => rem > curr,
        _ => false, // If parsing fails, assume not newer
    }
}

/// Check if enough time has passed since last check (24 hours)
pub fn should_check_now(last_check_timestamp: i64) -> bool {
    let now = current_timestamp();
    let twenty_four_hours = 24 * 60 * 60;
    (now - last_check_timestamp) >= twenty_four_hours
}

/// Fetch the latest release from GitHub
pub fn fetch_latest_release(
    owner: &str,
    repo: &str,
    channel: UpdateChannel,
) -> Result<ReleaseInfo, String> {
    let url = match channel {
        UpdateChannel::Stable => {
            format!("https://api.github.com/repos/{}/{}/releases/latest", owner, repo)
        }
        UpdateChannel::Beta => {
            // For beta channel, we fetch all releases and take the most recent
            format!("https://api.github.com/repos/{}/{}/releases", owner, repo)
        }
    };

    let response = minreq::get(&url)
        .with_header("User-Agent", "ScanBar")
        .with_timeout(10)
        .send()
        .map_err(|e| format!("Failed to connect to update server: {}", e))?;

    if response.status_code < 200 || response.status_code >= 300 {
        return Err(format!("Update server returned error: {}", response.status_code));
    }

    match channel {
        UpdateChannel::Stable => {
            // For stable, the API returns a single release
            response
                .json::<ReleaseInfo>()
                .map_err(|e| format!("Failed to parse update information: {}", e))
        }
        UpdateChannel::Beta => {
            let releases: Vec<ReleaseInfo> = response
                .json()
                .map_err(|e| format!("Failed to parse update information: {}", e))?;

            releases
                .into_iter()
                .next()
                .ok_or_else(|| "No releases found".to_string())
        }
    }
}

/// Check for updates given current version and settings
pub fn check_for_updates(
    current_version: &str,
    channel: UpdateChannel,
    skipped_versions: &[String],
) -> UpdateCheckResult {
    let release = match fetch_latest_release("scanbar-dev", "scanbar", channel) {
        Ok(r) => r,
        Err(e) => return UpdateCheckResult::Error(e),
    };

    let remote_version = release.tag_name.trim_start_matches('v');

    // Check if this version is skipped by user
    if skipped_versions.iter().any(|v| v == remote_version) {
        return UpdateCheckResult::NoUpdate;
    }

    if is_newer_version(current_version, remote_version) {
        UpdateCheckResult::UpdateAvailable(release)
    } else {
        UpdateCheckResult::NoUpdate
    }
}

/// Get current Unix timestamp
pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_comparison_newer() {
        assert!(is_newer_version("0.3.1", "0.3.2"));
        assert!(is_newer_version("0.3.1", "0.4.0"));
        assert!(is_newer_version("0.3.1", "1.0.0"));
    }

    #[test]
    fn test_version_comparison_same_or_older() {
        assert!(!is_newer_version("0.3.1", "0.3.1"));
        assert!(!is_newer_version("0.3.1", "0.3.0"));
        assert!(!is_newer_version("1.0.0", "0.9.9"));
    }

    #[test]
    fn test_version_comparison_prerelease() {
        // Prereleases are considered lower than releases
        assert!(is_newer_version("0.3.1", "0.3.2-beta.1"));
        assert!(is_newer_version("0.3.2-beta.1", "0.3.2"));
        assert!(!is_newer_version("0.3.2", "0.3.2-beta.1"));
    }

    #[test]
    fn test_version_comparison_invalid() {
        assert!(!is_newer_version("invalid", "0.3.1"));
        assert!(!is_newer_version("0.3.1", "invalid"));
    }

    #[test]
    fn test_should_check_now() {
        let twenty_five_hours_ago = current_timestamp() - (25 * 60 * 60);
        assert!(should_check_now(twenty_five_hours_ago));

        let one_hour_ago = current_timestamp() - (60 * 60);
        assert!(!should_check_now(one_hour_ago));

        // Never checked before (timestamp = 0)
        assert!(should_check_now(0));
    }

    #[test]
    fn test_release_info_version_strips_prefix() {
        let release = ReleaseInfo {
            tag_name: "v0.3.2".to_string(),
            name: "Release 0.3.2".to_string(),
            body: String::new(),
            html_url: "https://github.com/scanbar-dev/scanbar/releases/tag/v0.3.2".to_string(),
            published_at: "2025-11-02T00:00:00Z".to_string(),
            prerelease: false,
        };
        assert_eq!(release.version(), "0.3.2");

        let json = serde_json::to_string(&release).unwrap();
        let parsed: ReleaseInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version(), "0.3.2");
    }

    #[test]
    fn test_release_info_tolerates_missing_body() {
        let json = r#"{
            "tag_name": "v0.4.0",
            "name": "0.4.0",
            "html_url": "https://example.com",
            "published_at": "2025-11-02T00:00:00Z",
            "prerelease": true
        }"#;
        let parsed: ReleaseInfo = serde_json::from_str(json).unwrap();
        assert!(parsed.body.is_empty());
        assert!(parsed.prerelease);
    }
}
