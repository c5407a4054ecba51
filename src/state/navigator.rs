/// Node navigation
///
/// The navigator owns the loaded collection and the current position in it.
/// Every change to the screen goes through a [`ViewBinder`], so the logic
/// here runs the same against the live window and against tests.

use std::fmt::Display;

use tracing::{debug, error, info, warn};

use super::data::NodeCollection;
use crate::ui::binder::{file_label, file_name, ViewBinder};

/// Steps through node records in key order
#[derive(Debug, Clone)]
pub struct Navigator {
    collection: Option<NodeCollection>,
    current: Option<usize>,
    /// Nodes left behind by jumps, most recent last
    history: Vec<usize>,
    picture_dir: String,
}

impl Navigator {
    /// Create an empty navigator whose photos live under `picture_dir`
    pub fn new(picture_dir: impl Into<String>) -> Self {
        Self {
            collection: None,
            current: None,
            history: Vec::new(),
            picture_dir: picture_dir.into(),
        }
    }

    /// Fetch the collection from `source` synchronously and install it
    #[cfg(test)]
    pub fn load<S, V>(&mut self, source: &S, view: &mut V) -> bool
    where
        S: super::source::NodeSource + ?Sized,
        V: ViewBinder,
    {
        self.install(source.fetch_collection(), view)
    }

    /// Take the outcome of a load and show the first node
    ///
    /// This is the entry point for the window, which reads the file in the
    /// background with [`load_collection`](super::source::load_collection).
    /// Failures are logged and leave the navigator as it was.
    pub fn install<E, V>(&mut self, fetched: Result<NodeCollection, E>, view: &mut V) -> bool
    where
        E: Display,
        V: ViewBinder,
    {
        match fetched {
            Ok(collection) => {
                if collection.is_empty() {
                    warn!("node data is empty, nothing to show");
                } else {
                    info!(nodes = collection.len(), "📁 Node data loaded");
                }
                debug!(order = ?collection.keys().collect::<Vec<_>>(), "node order");

                self.collection = Some(collection);
                self.current = None;
                self.history.clear();
                self.render(0, view);
                true
            }
            Err(e) => {
                error!(error = %e, "failed to load node data");
                false
            }
        }
    }

    /// Show the node at `index` and make it current
    ///
    /// An index outside the collection changes nothing.
    pub fn render<V: ViewBinder>(&mut self, index: usize, view: &mut V) -> bool {
        let Some((id, record)) = self
            .collection
            .as_ref()
            .and_then(|collection| collection.get_index(index))
        else {
            return false;
        };

        if let Some(description) = &record.description {
            view.set_text(description);
        }

        if let Some(photo) = record.primary_photo() {
            view.set_primary_image(&self.resolve_photo(photo));
        }

        for slot in 0..view.section_count() {
            let Some(name) = view.section_source(slot).map(|src| file_name(src).to_string()) else {
                continue;
            };
            view.set_label(slot, &name);
        }

        debug!(index, id, "rendered node");
        self.current = Some(index);
        true
    }

    pub fn go_to_next<V: ViewBinder>(&mut self, view: &mut V) -> bool {
        match self.current {
            Some(index) if index + 1 < self.len() => self.visit(index + 1, view),
            _ => false,
        }
    }

    pub fn go_to_previous<V: ViewBinder>(&mut self, view: &mut V) -> bool {
        match self.current {
            Some(index) if index > 0 => self.visit(index - 1, view),
            _ => false,
        }
    }

    pub fn go_to_first<V: ViewBinder>(&mut self, view: &mut V) -> bool {
        self.visit(0, view)
    }

    pub fn go_to_second<V: ViewBinder>(&mut self, view: &mut V) -> bool {
        self.visit(1, view)
    }

    pub fn go_to_third<V: ViewBinder>(&mut self, view: &mut V) -> bool {
        self.visit(2, view)
    }

    pub fn go_to_last<V: ViewBinder>(&mut self, view: &mut V) -> bool {
        match self.len() {
            0 => false,
            len => self.visit(len - 1, view),
        }
    }

    /// Show the node with the given identifier
    pub fn go_to_node<V: ViewBinder>(&mut self, id: &str, view: &mut V) -> bool {
        match self.collection.as_ref().and_then(|c| c.position(id)) {
            Some(index) => self.visit(index, view),
            None => {
                debug!(id, "no such node");
                false
            }
        }
    }

    /// Return to the node shown before the last move
    pub fn go_back<V: ViewBinder>(&mut self, view: &mut V) -> bool {
        let Some(index) = self.history.pop() else {
            return false;
        };
        self.render(index, view)
    }

    /// Forget the history and show the first node
    pub fn go_home<V: ViewBinder>(&mut self, view: &mut V) -> bool {
        self.history.clear();
        self.render(0, view)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Render `index` and remember the node it replaces
    fn visit<V: ViewBinder>(&mut self, index: usize, view: &mut V) -> bool {
        let previous = self.current;
        if !self.render(index, view) {
            return false;
        }
        if let Some(previous) = previous.filter(|&previous| previous != index) {
            self.history.push(previous);
        }
        true
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Identifier of the node on screen
    pub fn current_id(&self) -> Option<&str> {
        let index = self.current?;
        self.collection
            .as_ref()
            .and_then(|c| c.get_index(index))
            .map(|(id, _)| id)
    }

    /// Photo paths of the node on screen, resolved under the picture directory
    pub fn current_photos(&self) -> Vec<String> {
        let Some(index) = self.current else {
            return Vec::new();
        };
        self.collection
            .as_ref()
            .and_then(|c| c.get_index(index))
            .map(|(_, record)| {
                record
                    .photos()
                    .into_iter()
                    .map(|photo| self.resolve_photo(photo))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.collection.as_ref().map_or(0, NodeCollection::len)
    }

    pub fn is_loaded(&self) -> bool {
        self.collection.is_some()
    }

    fn resolve_photo(&self, photo: &str) -> String {
        let dir = self.picture_dir.trim_end_matches('/');
        if dir.is_empty() {
            photo.to_string()
        } else {
            format!("{dir}/{photo}")
        }
    }
}

/// Show an arbitrary image in the primary container
pub fn update_photo<V: ViewBinder>(view: &mut V, path: &str) {
    view.set_primary_image(path);
}

/// Swap the image of a secondary section and relabel it
pub fn update_image<V: ViewBinder>(view: &mut V, slot: usize, path: &str) -> bool {
    if slot >= view.section_count() {
        return false;
    }
    view.set_section_image(slot, path) && view.set_label(slot, file_label(path))
}
