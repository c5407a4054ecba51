use iced::keyboard::{self, key};
use iced::widget::{column, container, row, text, Column};
use iced::{Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod error;
mod photo;
mod state;
mod ui;

use config::Config;
use state::flow::{load_flow, Category, FlowGraph};
use state::navigator::{update_image, update_photo, Navigator};
use state::source::load_collection;
use ui::binder::{DisplayState, ViewBinder};
use ui::fit::Dimensions;
use ui::panels;

/// Main application state
struct NodeViewer {
    /// Position in the node sequence
    navigator: Navigator,
    /// Everything currently on screen
    display: DisplayState,
    /// Titles and links, empty unless a flow file is configured
    flow: FlowGraph,
    /// Category expanded in the side panel
    category: Option<Category>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Background read of the annotation file finished
    NodesLoaded(Result<state::data::NodeCollection, String>),
    /// Background read of the flow file finished
    FlowLoaded(Result<FlowGraph, String>),
    /// Gallery folder scan finished
    GalleryScanned(Vec<String>),
    /// The primary photo finished loading
    PhotoLoaded {
        source: String,
        result: Result<Dimensions, String>,
    },
    Next,
    Previous,
    First,
    Second,
    Third,
    Last,
    /// Follow a flow link to another node
    JumpTo(String),
    /// Return to the node shown before the last move
    Back,
    /// Clear the history and show the first node
    Home,
    /// Expand a category in the side panel
    SelectCategory(Category),
    /// Show one of the current node's photos in the primary container
    ShowPhoto(String),
    /// Show a gallery section in the primary container
    ShowSection(usize),
    /// Pick a new image for a gallery section
    ReplaceSection(usize),
}

impl NodeViewer {
    /// Create the viewer and start loading its inputs
    fn new(config: Config) -> (Self, Task<Message>) {
        info!(
            data = %config.data_path.display(),
            pictures = %config.picture_dir,
            "🎨 Node viewer starting"
        );

        let mut tasks = vec![Task::perform(
            load_collection(config.data_path.clone()),
            Message::NodesLoaded,
        )];

        if let Some(flow_path) = config.flow_path.clone() {
            tasks.push(Task::perform(load_flow(flow_path), Message::FlowLoaded));
        }

        if let Some(gallery_dir) = config.gallery_dir.clone() {
            tasks.push(Task::perform(
                photo::gallery::scan_gallery(gallery_dir),
                Message::GalleryScanned,
            ));
        }

        let viewer = NodeViewer {
            navigator: Navigator::new(config.picture_dir.clone()),
            display: DisplayState::new(),
            flow: FlowGraph::default(),
            category: None,
            status: format!("Loading {}...", config.data_path.display()),
        };

        (viewer, Task::batch(tasks))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NodesLoaded(result) => {
                let failure = result.as_ref().err().cloned();
                if self.navigator.install(result, &mut self.display) {
                    self.status = format!("{} nodes loaded.", self.navigator.len());
                } else if let Some(e) = failure {
                    self.status = format!("Could not load node data: {}", e);
                }
            }
            Message::FlowLoaded(Ok(flow)) => {
                self.category = flow.categories().first().copied();
                self.flow = flow;
            }
            Message::FlowLoaded(Err(e)) => {
                warn!(error = %e, "flow graph unavailable");
            }
            Message::GalleryScanned(paths) => {
                self.display.set_sections(paths);
            }
            Message::PhotoLoaded { source, result } => match result {
                Ok(natural) => {
                    self.display.primary_loaded(&source, natural);
                }
                Err(e) => error!(source = %source, error = %e, "failed to load photo"),
            },
            Message::Next => {
                self.navigator.go_to_next(&mut self.display);
            }
            Message::Previous => {
                self.navigator.go_to_previous(&mut self.display);
            }
            Message::First => {
                self.navigator.go_to_first(&mut self.display);
            }
            Message::Second => {
                self.navigator.go_to_second(&mut self.display);
            }
            Message::Third => {
                self.navigator.go_to_third(&mut self.display);
            }
            Message::Last => {
                self.navigator.go_to_last(&mut self.display);
            }
            Message::JumpTo(id) => {
                self.navigator.go_to_node(&id, &mut self.display);
            }
            Message::Back => {
                self.navigator.go_back(&mut self.display);
            }
            Message::Home => {
                self.navigator.go_home(&mut self.display);
                self.category = self.flow.categories().first().copied();
            }
            Message::SelectCategory(category) => {
                self.category = Some(category);
            }
            Message::ShowPhoto(path) => {
                update_photo(&mut self.display, &path);
            }
            Message::ShowSection(slot) => {
                if let Some(source) = self.display.section_source(slot).map(str::to_string) {
                    update_photo(&mut self.display, &source);
                }
            }
            Message::ReplaceSection(slot) => {
                let picked = FileDialog::new()
                    .set_title("Select Image")
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
                    .pick_file();

                if let Some(path) = picked {
                    update_image(&mut self.display, slot, &path.to_string_lossy());
                }
            }
        }

        self.load_pending_photo()
    }

    /// Start probing the primary photo if its source just changed
    fn load_pending_photo(&mut self) -> Task<Message> {
        match self.display.take_pending_load() {
            Some(source) => Task::perform(
                photo::loader::probe_dimensions(source.clone()),
                move |result| Message::PhotoLoaded {
                    source: source.clone(),
                    result,
                },
            ),
            None => Task::none(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let title = self
            .navigator
            .current_id()
            .map(|id| self.flow.label(id).unwrap_or(id).to_string())
            .unwrap_or_else(|| {
                let placeholder = if self.navigator.is_loaded() { "No nodes" } else { "Node Viewer" };
                placeholder.to_string()
            });

        let photos = self.navigator.current_photos();

        let center: Column<Message> = column![
            panels::header(title, self.navigator.current_index(), self.navigator.len()),
            panels::description(self.display.text().unwrap_or_default()),
            container(panels::primary_photo(self.display.primary()))
                .width(Length::Fill)
                .height(Length::FillPortion(4)),
            panels::photo_strip(photos),
            panels::navigation_bar(self.navigator.can_go_back()),
            panels::gallery(self.display.sections()),
            text(&self.status).size(14),
        ]
        .spacing(16)
        .width(Length::Fill);

        let node = self
            .navigator
            .current_id()
            .filter(|_| !self.flow.is_empty())
            .and_then(|id| self.flow.get(id));
        let (backward, forward) = panels::flow_panels(node, &self.flow);

        let mut layout = row![].spacing(20);
        if !self.flow.is_empty() {
            layout = layout.push(panels::category_panel(&self.flow, self.category));
        }
        if let Some(backward) = backward {
            layout = layout.push(backward);
        }
        layout = layout.push(center);
        if let Some(forward) = forward {
            layout = layout.push(forward);
        }

        container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }

    /// Arrow keys step through nodes, Home/End jump to the ends, Backspace goes back
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|pressed, _modifiers| match pressed {
            keyboard::Key::Named(key::Named::ArrowRight) => Some(Message::Next),
            keyboard::Key::Named(key::Named::ArrowLeft) => Some(Message::Previous),
            keyboard::Key::Named(key::Named::Home) => Some(Message::First),
            keyboard::Key::Named(key::Named::End) => Some(Message::Last),
            keyboard::Key::Named(key::Named::Backspace) => Some(Message::Back),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    let config = Config::from_env();

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).compact().init();

    iced::application("Node Viewer", NodeViewer::update, NodeViewer::view)
        .subscription(NodeViewer::subscription)
        .theme(NodeViewer::theme)
        .centered()
        .run_with(move || NodeViewer::new(config))
}
