//! Viewer configuration loaded from environment variables.
//!
//! | Variable                  | Default                  | Description                         |
//! |---------------------------|--------------------------|-------------------------------------|
//! | `NODE_VIEWER_DATA`        | `node_annotations2.json` | Node annotation JSON file           |
//! | `NODE_VIEWER_PICTURE_DIR` | `picture`                | Directory node photos live in       |
//! | `NODE_VIEWER_FLOW`        | (unset)                  | Graphviz DOT file with node links   |
//! | `NODE_VIEWER_GALLERY`     | (unset)                  | Folder of photos for the gallery    |
//! | `NODE_VIEWER_LOG`         | `info`                   | tracing filter                      |

use std::path::PathBuf;

/// Runtime configuration for the viewer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Node annotation file.
    pub data_path: PathBuf,

    /// Prefix for photo paths found in the annotations.
    pub picture_dir: String,

    /// Optional flow graph giving node titles and links.
    pub flow_path: Option<PathBuf>,

    /// Optional folder scanned for gallery sections.
    pub gallery_dir: Option<PathBuf>,

    /// Tracing filter string, e.g. `"node_viewer=debug,info"`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, applying defaults where
    /// a variable is absent or empty.
    pub fn from_env() -> Self {
        Self {
            data_path:   PathBuf::from(env_str("NODE_VIEWER_DATA", "node_annotations2.json")),
            picture_dir: env_str("NODE_VIEWER_PICTURE_DIR", "picture"),
            flow_path:   env_opt("NODE_VIEWER_FLOW").map(PathBuf::from),
            gallery_dir: env_opt("NODE_VIEWER_GALLERY").map(PathBuf::from),
            log_level:   env_str("NODE_VIEWER_LOG", "info"),
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_str(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}
