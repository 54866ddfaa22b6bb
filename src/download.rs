/// Download collaborator
///
/// Fetches a vision's image reference and saves it as a local file. The
/// filename is derived from the goal text; the destination comes from a
/// native save dialog seeded with the user's download directory.
/// Download failures never block the workflow.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::DownloadError;

/// How many goal characters make it into the suggested filename
const FILENAME_GOAL_PREFIX_LEN: usize = 30;

/// Derive a safe filename from the goal text
///
/// The goal is truncated to a bounded prefix and every non-alphanumeric
/// character is replaced, e.g. "vision-Running-my-own-bakery-.jpg".
pub fn suggested_filename(goal: &str) -> String {
    let slug: String = goal
        .chars()
        .take(FILENAME_GOAL_PREFIX_LEN)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("vision-{slug}.jpg")
}

/// Ask the user where to save, seeded with the derived filename and the
/// platform download directory. None means the user cancelled.
pub fn pick_save_path(goal: &str) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save Vision")
        .set_file_name(suggested_filename(goal));

    if let Some(dir) = dirs::download_dir().or_else(dirs::home_dir) {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}

/// Fetch the bytes behind an image reference
///
/// Handles both remote URLs and the self-contained data URLs the
/// simulated provider produces.
pub async fn fetch_image(url: String) -> Result<Vec<u8>, DownloadError> {
    if let Some(rest) = url.strip_prefix("data:") {
        let Some((_, payload)) = rest.split_once(";base64,") else {
            return Err(DownloadError::Failed("unsupported data URL".to_string()));
        };
        return BASE64
            .decode(payload)
            .map_err(|e| DownloadError::Failed(format!("invalid base64 payload: {e}")));
    }

    let response = reqwest::get(&url)
        .await
        .map_err(|e| DownloadError::Failed(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Failed(format!("server returned {status}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| DownloadError::Failed(format!("failed to read body: {e}")))?;

    Ok(bytes.to_vec())
}

/// Fetch an image reference and write it to `dest`
pub async fn save_image(url: String, dest: PathBuf) -> Result<PathBuf, DownloadError> {
    let bytes = fetch_image(url).await?;

    std::fs::write(&dest, &bytes)
        .map_err(|e| DownloadError::Failed(format!("failed to write {}: {e}", dest.display())))?;

    println!("💾 Saved vision to {}", dest.display());
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_replaces_non_alphanumeric() {
        assert_eq!(
            suggested_filename("Running my own bakery!"),
            "vision-Running-my-own-bakery-.jpg"
        );
    }

    #[test]
    fn test_filename_truncates_long_goals() {
        let goal = "a".repeat(100);
        let name = suggested_filename(&goal);
        assert_eq!(name, format!("vision-{}.jpg", "a".repeat(30)));
    }

    #[test]
    fn test_filename_handles_empty_goal() {
        assert_eq!(suggested_filename(""), "vision-.jpg");
    }

    #[tokio::test]
    async fn test_fetch_decodes_data_urls() {
        let payload = BASE64.encode([1u8, 2, 3, 4]);
        let url = format!("data:image/jpeg;base64,{payload}");
        let bytes = fetch_image(url).await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_data_urls() {
        let result = fetch_image("data:image/jpeg;utf8,oops".to_string()).await;
        assert!(matches!(result, Err(DownloadError::Failed(_))));
    }
}
