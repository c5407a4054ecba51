/// Background image probing
///
/// The primary photo is only sized once its natural dimensions are known.
/// Reading the header is cheap but still file I/O, so it runs off the UI.

use std::path::Path;
use tokio::task;
use tracing::debug;

use crate::ui::fit::Dimensions;

/// Read the pixel dimensions of an image file
///
/// # Returns
/// * `Ok(dimensions)` - Width and height in pixels
/// * `Err(String)` - Error message if the file is missing or not an image
pub async fn probe_dimensions(path: String) -> Result<Dimensions, String> {
    task::spawn_blocking(move || probe_dimensions_blocking(&path))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

fn probe_dimensions_blocking(path: &str) -> Result<Dimensions, String> {
    let path = Path::new(path);

    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }

    let (width, height) = image::image_dimensions(path)
        .map_err(|e| format!("Failed to read image {}: {}", path.display(), e))?;

    debug!(path = %path.display(), width, height, "probed image");
    Ok(Dimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_missing_file() {
        let result = probe_dimensions("/nonexistent/photo.png".to_string()).await;
        assert!(result.unwrap_err().starts_with("File not found"));
    }

    #[tokio::test]
    async fn test_probe_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbImage::new(8, 3).save(&path).unwrap();

        let dims = probe_dimensions(path.to_string_lossy().to_string()).await.unwrap();
        assert_eq!(dims, Dimensions { width: 8, height: 3 });
    }

    #[tokio::test]
    async fn test_probe_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = probe_dimensions(path.to_string_lossy().to_string()).await;
        assert!(result.is_err());
    }
}
