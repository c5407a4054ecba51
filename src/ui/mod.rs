/// User interface module
///
/// - `binder.rs` - the view binder seam and the in-memory display state
/// - `fit.rs` - aspect-preserving photo sizing
/// - `panels.rs` - iced widget builders for the window

pub mod binder;
pub mod fit;
pub mod panels;
