/// The seam between navigation logic and what is on screen
///
/// The navigator never touches widgets. It writes through [`ViewBinder`],
/// and the application renders whatever [`DisplayState`] holds.

use super::fit::Dimensions;

/// Extension stripped from section labels when an image is swapped in
pub const LABEL_EXTENSION: &str = ".png";

/// Write access to the displayed fields
pub trait ViewBinder {
    /// Set the description field. Returns false when no field is bound.
    fn set_text(&mut self, text: &str) -> bool;

    /// Replace the primary image source
    fn set_primary_image(&mut self, source: &str);

    /// Number of secondary image/label sections
    fn section_count(&self) -> usize;

    /// Current image source of a section
    fn section_source(&self, slot: usize) -> Option<&str>;

    /// Replace a section's image source. Returns false for an unknown slot.
    fn set_section_image(&mut self, slot: usize, source: &str) -> bool;

    /// Replace a section's label. Returns false for an unknown slot.
    fn set_label(&mut self, slot: usize, text: &str) -> bool;
}

/// Last segment of an image path
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// File name with the label extension removed
pub fn file_label(path: &str) -> &str {
    let name = file_name(path);
    name.strip_suffix(LABEL_EXTENSION).unwrap_or(name)
}

/// The photo in the primary container
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryImage {
    pub source: String,
    /// Known once the image has loaded
    pub natural: Option<Dimensions>,
}

/// A secondary image with its name label
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSection {
    pub source: String,
    pub label: String,
}

/// In-memory copy of everything the window shows
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    /// `None` when the window has no description field
    text_field: Option<String>,
    primary: Option<PrimaryImage>,
    sections: Vec<PhotoSection>,
    pending_load: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            text_field: Some(String::new()),
            primary: None,
            sections: Vec::new(),
            pending_load: None,
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A display without a description field
    #[cfg(test)]
    pub fn without_text_field() -> Self {
        Self {
            text_field: None,
            ..Self::default()
        }
    }

    /// Install secondary sections, labelling each from its file name
    #[cfg(test)]
    pub fn with_sections<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_sections(sources);
        self
    }

    /// Replace all secondary sections, labelling each from its file name
    pub fn set_sections<I, S>(&mut self, sources: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections = sources
            .into_iter()
            .map(|source| {
                let source = source.into();
                let label = file_label(&source).to_string();
                PhotoSection { source, label }
            })
            .collect();
    }

    pub fn text(&self) -> Option<&str> {
        self.text_field.as_deref()
    }

    pub fn primary(&self) -> Option<&PrimaryImage> {
        self.primary.as_ref()
    }

    pub fn sections(&self) -> &[PhotoSection] {
        &self.sections
    }

    /// Take the image source waiting to be loaded, if any
    pub fn take_pending_load(&mut self) -> Option<String> {
        self.pending_load.take()
    }

    /// Record the natural size of a loaded primary image
    ///
    /// Results for a source that has since been replaced are dropped.
    pub fn primary_loaded(&mut self, source: &str, natural: Dimensions) -> bool {
        match &mut self.primary {
            Some(primary) if primary.source == source => {
                primary.natural = Some(natural);
                true
            }
            _ => false,
        }
    }
}

impl ViewBinder for DisplayState {
    fn set_text(&mut self, text: &str) -> bool {
        match &mut self.text_field {
            Some(field) => {
                field.clear();
                field.push_str(text);
                true
            }
            None => false,
        }
    }

    fn set_primary_image(&mut self, source: &str) {
        self.primary = Some(PrimaryImage {
            source: source.to_string(),
            natural: None,
        });
        self.pending_load = Some(source.to_string());
    }

    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn section_source(&self, slot: usize) -> Option<&str> {
        self.sections.get(slot).map(|section| section.source.as_str())
    }

    fn set_section_image(&mut self, slot: usize, source: &str) -> bool {
        match self.sections.get_mut(slot) {
            Some(section) => {
                section.source = source.to_string();
                true
            }
            None => false,
        }
    }

    fn set_label(&mut self, slot: usize, text: &str) -> bool {
        match self.sections.get_mut(slot) {
            Some(section) => {
                section.label = text.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_and_label() {
        assert_eq!(file_name("picture/foo.png"), "foo.png");
        assert_eq!(file_name("a/b/c.jpg"), "c.jpg");
        assert_eq!(file_name("C:\\photos\\bar.png"), "bar.png");
        assert_eq!(file_name("plain"), "plain");

        assert_eq!(file_label("picture/foo.png"), "foo");
        assert_eq!(file_label("picture/foo.jpg"), "foo.jpg");
        assert_eq!(file_label("picture/foo.png.bak"), "foo.png.bak");
    }

    #[test]
    fn test_sections_are_labelled_on_install() {
        let display = DisplayState::new().with_sections(["gallery/one.png", "gallery/two.jpg"]);

        let labels: Vec<&str> = display.sections().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["one", "two.jpg"]);
    }

    #[test]
    fn test_missing_text_field() {
        let mut display = DisplayState::without_text_field();
        assert!(!display.set_text("ignored"));
        assert_eq!(display.text(), None);

        let mut display = DisplayState::new();
        assert_eq!(display.text(), Some(""));
        assert!(display.set_text("hello"));
        assert_eq!(display.text(), Some("hello"));
    }

    #[test]
    fn test_primary_image_load_cycle() {
        let mut display = DisplayState::new();
        assert_eq!(display.take_pending_load(), None);

        display.set_primary_image("picture/a.png");
        assert_eq!(display.take_pending_load().as_deref(), Some("picture/a.png"));
        assert_eq!(display.take_pending_load(), None);

        let size = Dimensions { width: 40, height: 20 };
        assert!(display.primary_loaded("picture/a.png", size));
        assert_eq!(display.primary().unwrap().natural, Some(size));
    }

    #[test]
    fn test_stale_load_result_is_ignored() {
        let mut display = DisplayState::new();
        display.set_primary_image("picture/a.png");
        display.set_primary_image("picture/b.png");

        let size = Dimensions { width: 40, height: 20 };
        assert!(!display.primary_loaded("picture/a.png", size));
        assert_eq!(display.primary().unwrap().natural, None);
    }

    #[test]
    fn test_unknown_section_slot() {
        let mut display = DisplayState::new().with_sections(["gallery/one.png"]);
        assert!(!display.set_section_image(3, "x.png"));
        assert!(!display.set_label(3, "x"));
        assert_eq!(display.section_source(3), None);
        assert_eq!(display.section_source(0), Some("gallery/one.png"));
    }
}
