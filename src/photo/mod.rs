/// Photo file handling
///
/// This module handles:
/// - Probing image dimensions in the background (loader.rs)
/// - Scanning a folder for gallery images (gallery.rs)

pub mod gallery;
pub mod loader;
