/// State management module
///
/// This module handles all viewer state, including:
/// - Node records and their key order (data.rs)
/// - Where the records are read from (source.rs)
/// - The current position and navigation (navigator.rs)
/// - The optional flow graph of node links (flow.rs)

pub mod data;
pub mod flow;
pub mod navigator;
pub mod source;
