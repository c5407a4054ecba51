/// Gallery folder scanning
///
/// The secondary image/label sections are filled from a folder of photos.

use std::path::PathBuf;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Extensions picked up by the scan (lowercase)
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Collect every image file under `folder`, sorted by path
pub async fn scan_gallery(folder: PathBuf) -> Vec<String> {
    match tokio::task::spawn_blocking(move || scan_gallery_blocking(&folder)).await {
        Ok(paths) => paths,
        Err(e) => {
            warn!(error = %e, "gallery scan did not finish");
            Vec::new()
        }
    }
}

fn scan_gallery_blocking(folder: &std::path::Path) -> Vec<String> {
    if !folder.is_dir() {
        warn!(folder = %folder.display(), "gallery folder does not exist");
        return Vec::new();
    }

    let mut paths: Vec<String> = WalkDir::new(folder)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        })
        .map(|entry| entry.path().to_string_lossy().to_string())
        .collect();

    paths.sort();
    info!(count = paths.len(), folder = %folder.display(), "🖼️ Gallery scanned");
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scan_picks_images_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.png"), b"").unwrap();
        std::fs::write(dir.path().join("a.JPG"), b"").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"").unwrap();
        std::fs::write(dir.path().join("nested").join("c.webp"), b"").unwrap();

        let paths = scan_gallery(dir.path().to_path_buf()).await;
        let names: Vec<&str> = paths
            .iter()
            .map(|p| crate::ui::binder::file_name(p))
            .collect();

        assert_eq!(names, vec!["a.JPG", "b.png", "c.webp"]);
    }

    #[tokio::test]
    async fn test_scan_missing_folder() {
        let paths = scan_gallery(PathBuf::from("/nonexistent/gallery")).await;
        assert!(paths.is_empty());
    }
}
