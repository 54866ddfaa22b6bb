/// Gallery step view
///
/// A wrap grid of vision cards (preview, goal, date, download and share
/// actions), plus the empty state and the create-new affordance.

use std::collections::HashMap;

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;
use uuid::Uuid;

use crate::state::data::Vision;
use crate::state::gallery::GalleryStore;
use crate::Message;

pub fn view<'a>(
    gallery: &'a GalleryStore,
    previews: &'a HashMap<Uuid, image::Handle>,
) -> Element<'a, Message> {
    if gallery.is_empty() {
        return container(
            column![
                text("No Visions Yet").size(20),
                text("Create your first AI-generated vision of success!").size(14),
                button(text("+ Create Your First Vision"))
                    .on_press(Message::StartOver)
                    .padding(12),
            ]
            .spacing(12)
            .align_x(Alignment::Center),
        )
        .center_x(Length::Fill)
        .padding(40)
        .into();
    }

    let count = gallery.len();
    let header = row![
        column![
            text("Your Visions").size(20),
            text(format!(
                "{count} vision{} created",
                if count == 1 { "" } else { "s" }
            ))
            .size(13),
        ]
        .spacing(4),
        button(text("+ Create New Vision"))
            .on_press(Message::StartOver)
            .padding(10),
    ]
    .spacing(24)
    .align_y(Alignment::Center);

    let cards: Vec<Element<'a, Message>> = gallery
        .all()
        .iter()
        .map(|vision| vision_card(vision, previews.get(&vision.id)))
        .collect();

    let grid = Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0);

    let footer = container(
        column![
            text("Keep Visualizing Your Success!").size(15),
            text("The more you visualize your goals, the more motivated you'll be to achieve them.")
                .size(12),
        ]
        .spacing(6)
        .align_x(Alignment::Center),
    )
    .padding(16)
    .style(container::rounded_box)
    .width(Length::Fill);

    column![header, grid, footer]
        .spacing(20)
        .align_x(Alignment::Center)
        .into()
}

fn vision_card<'a>(
    vision: &'a Vision,
    preview: Option<&'a image::Handle>,
) -> Element<'a, Message> {
    let preview_el: Element<'a, Message> = match preview {
        Some(handle) => image(handle.clone()).width(Length::Fixed(220.0)).into(),
        None => container(text("🖼").size(48)).padding(40).into(),
    };

    container(
        column![
            preview_el,
            text(&vision.goal).size(13),
            text(vision.formatted_date()).size(11),
            row![
                button(text("⬇ Download").size(12))
                    .on_press(Message::DownloadVision(vision.id))
                    .padding(8),
                button(text("⤴ Share").size(12))
                    .on_press(Message::ShareVision(vision.id))
                    .padding(8),
            ]
            .spacing(8),
        ]
        .spacing(8),
    )
    .padding(12)
    .style(container::rounded_box)
    .width(Length::Fixed(244.0))
    .into()
}
