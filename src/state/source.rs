/// Where node annotations come from
///
/// The navigator only needs "give me the JSON text". Tests hand it a fixed
/// string; the application reads a file through [`FileSource`], off the UI
/// thread via [`load_collection`].

use std::path::PathBuf;
use tokio::task;

use super::data::NodeCollection;
use crate::error::{Result, ViewerError};

/// A provider of node annotation JSON
pub trait NodeSource {
    /// Fetch the raw JSON payload
    fn fetch(&self) -> Result<String>;

    /// Fetch and parse the payload into a collection
    fn fetch_collection(&self) -> Result<NodeCollection> {
        NodeCollection::from_json(&self.fetch()?)
    }
}

/// Reads annotations from a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NodeSource for FileSource {
    fn fetch(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| ViewerError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Read and parse an annotation file without blocking the UI
///
/// Errors are flattened to strings so the result can travel inside a
/// `Message`.
pub async fn load_collection(path: PathBuf) -> std::result::Result<NodeCollection, String> {
    task::spawn_blocking(move || FileSource::new(path).fetch_collection().map_err(|e| e.to_string()))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_source_reads_collection() {
        let file = write_fixture(r#"{"a": {"description": "D1"}}"#);
        let source = FileSource::new(file.path());

        let collection = source.fetch_collection().unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/node_annotations2.json");
        assert!(matches!(source.fetch(), Err(ViewerError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load_collection_async() {
        let file = write_fixture(r#"{"x": {}, "y": {"photo_paths": ["y.png"]}}"#);

        let collection = load_collection(file.path().to_path_buf()).await.unwrap();
        let keys: Vec<&str> = collection.keys().collect();
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_load_collection_reports_errors() {
        let missing = load_collection(PathBuf::from("/nonexistent/nodes.json")).await;
        assert!(missing.unwrap_err().contains("/nonexistent/nodes.json"));

        let file = write_fixture("not json");
        let malformed = load_collection(file.path().to_path_buf()).await;
        assert!(malformed.unwrap_err().starts_with("malformed node data"));
    }
}
