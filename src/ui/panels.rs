/// Widget builders for the viewer window
use iced::widget::image::Handle;
use iced::widget::{self, button, column, container, responsive, row, scrollable, text, text_input, Column, Row};
use iced::{Alignment, ContentFit, Element, Length, Pixels, Size};
use iced_aw::Wrap;

use super::binder::{file_name, PhotoSection, PrimaryImage};
use super::fit::fit_within;
use crate::state::flow::{Category, FlowGraph, FlowLink, FlowNode};
use crate::Message;

/// Side length of gallery thumbnails
const THUMBNAIL_SIZE: f32 = 120.0;

/// Node title with its position in the sequence
pub fn header<'a>(title: String, position: Option<usize>, total: usize) -> Element<'a, Message> {
    let counter = match position {
        Some(index) => format!("{} / {}", index + 1, total),
        None => format!("– / {}", total),
    };

    row![text(title).size(28).width(Length::Fill), text(counter).size(16)]
        .align_y(Alignment::Center)
        .spacing(20)
        .into()
}

/// Read-only description field
pub fn description(value: &str) -> Element<'_, Message> {
    text_input("No description", value).padding(10).size(16).into()
}

/// The primary photo, sized to its container once loaded
pub fn primary_photo<'a>(primary: Option<&PrimaryImage>) -> Element<'a, Message> {
    let Some(primary) = primary.cloned() else {
        return placeholder("No photo");
    };

    responsive(move |bounds: Size| {
        let photo: widget::Image<Handle> =
            widget::image(Handle::from_path(&primary.source)).content_fit(ContentFit::Contain);

        let photo = match primary.natural {
            Some(natural) => {
                let (width, height) = fit_within(natural, (bounds.width, bounds.height));
                photo.width(Length::Fixed(width)).height(Length::Fixed(height))
            }
            None => photo.width(Length::Shrink).height(Length::Shrink),
        };

        container(photo)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    })
    .into()
}

/// One button per photo of the current node
pub fn photo_strip<'a>(photos: Vec<String>) -> Element<'a, Message> {
    let buttons: Vec<Element<'a, Message>> = photos
        .into_iter()
        .map(|path| {
            button(text(file_name(&path).to_string()).size(14))
                .on_press(Message::ShowPhoto(path))
                .padding(6)
                .into()
        })
        .collect();

    scrollable(Row::with_children(buttons).spacing(8))
        .direction(scrollable::Direction::Horizontal(scrollable::Scrollbar::new()))
        .into()
}

/// Sequential navigation controls, with Back enabled only when there is history
pub fn navigation_bar<'a>(can_go_back: bool) -> Element<'a, Message> {
    row![
        button("Back").on_press_maybe(can_go_back.then_some(Message::Back)).padding(10),
        button("Home").on_press(Message::Home).padding(10),
        button("First").on_press(Message::First).padding(10),
        button("Second").on_press(Message::Second).padding(10),
        button("Third").on_press(Message::Third).padding(10),
        button("◀ Previous").on_press(Message::Previous).padding(10),
        button("Next ▶").on_press(Message::Next).padding(10),
        button("Last").on_press(Message::Last).padding(10),
    ]
    .spacing(10)
    .into()
}

/// Backward or forward links of the current node in the flow graph
pub fn flow_links<'a>(
    heading: &'a str,
    links: &'a [FlowLink],
    flow: &'a FlowGraph,
) -> Element<'a, Message> {
    let mut list = Column::new()
        .spacing(8)
        .push(text(heading).size(18));

    if links.is_empty() {
        list = list.push(text("None").size(14));
    }

    for link in links {
        list = list.push(
            button(text(flow.caption(link)).size(14))
                .on_press(Message::JumpTo(link.id.clone()))
                .width(Length::Fill)
                .padding(8),
        );
    }

    scrollable(list.width(Length::Fixed(200.0))).into()
}

/// Links column pair for a node, or nothing when the flow has no such node
pub fn flow_panels<'a>(
    node: Option<&'a FlowNode>,
    flow: &'a FlowGraph,
) -> (Option<Element<'a, Message>>, Option<Element<'a, Message>>) {
    match node {
        Some(node) => (
            Some(flow_links("Backward", &node.backward, flow)),
            Some(flow_links("Forward", &node.forward, flow)),
        ),
        None => (None, None),
    }
}

/// Category list; the selected category expands to its nodes
pub fn category_panel(flow: &FlowGraph, selected: Option<Category>) -> Element<'_, Message> {
    let mut list = Column::new().spacing(6).push(text("Categories").size(18));

    for category in flow.categories() {
        list = list.push(
            button(text(category.name()).size(14))
                .on_press(Message::SelectCategory(category))
                .width(Length::Fill)
                .padding(8),
        );

        if selected == Some(category) {
            for node in flow.nodes_in(category) {
                list = list.push(
                    button(text(node.label.as_str()).size(13))
                        .on_press(Message::JumpTo(node.id.clone()))
                        .width(Length::Fill)
                        .padding([4, 20]),
                );
            }
        }
    }

    scrollable(list.width(Length::Fixed(200.0))).into()
}

/// Secondary photos with their name labels
pub fn gallery(sections: &[PhotoSection]) -> Element<'_, Message> {
    let tiles: Vec<Element<'_, Message>> = sections
        .iter()
        .enumerate()
        .map(|(slot, section)| {
            let thumb: widget::Image<Handle> = widget::image(Handle::from_path(&section.source))
                .width(Length::Fixed(THUMBNAIL_SIZE))
                .height(Length::Fixed(THUMBNAIL_SIZE))
                .content_fit(ContentFit::Contain);

            column![
                button(thumb).on_press(Message::ShowSection(slot)).padding(2),
                text(section.label.as_str()).size(14),
                button(text("Replace…").size(12))
                    .on_press(Message::ReplaceSection(slot))
                    .padding(4),
            ]
            .spacing(4)
            .align_x(Alignment::Center)
            .into()
        })
        .collect();

    Wrap::with_elements(tiles)
        .spacing(Pixels(10.0))
        .line_spacing(Pixels(10.0))
        .into()
}

fn placeholder<'a>(message: &'a str) -> Element<'a, Message> {
    container(text(message).size(16))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
