/// Generation step view
///
/// Credential entry, previews of the photo and goal going into the
/// request, the progress bar with its stage label while a generation is
/// in flight, and the submit button (disabled while one is outstanding).

use iced::widget::{button, column, container, image, progress_bar, row, text, text_input, Column};
use iced::{Alignment, Color, Element, Length};

use crate::error::GenerateError;
use crate::goal::Goal;
use crate::state::data::CapturedPhoto;
use crate::Message;

#[allow(clippy::too_many_arguments)]
pub fn view<'a>(
    photo: Option<&'a CapturedPhoto>,
    goal: Option<&'a Goal>,
    api_key: &'a str,
    generating: bool,
    progress: f32,
    stage: &'a str,
    error: Option<&'a GenerateError>,
) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(16)
        .align_x(Alignment::Center)
        .max_width(640);

    content = content.push(
        column![
            text("Generating Your Vision").size(24),
            text("Creating an AI image of you achieving your goal").size(14),
        ]
        .spacing(6)
        .align_x(Alignment::Center),
    );

    // Credential entry
    content = content.push(
        container(
            column![
                text("🔑 Runware API Key Required").size(15),
                text("To generate your personalized vision, you'll need a Runware API key. Get yours at runware.ai").size(12),
                text_input("Enter your Runware API key...", api_key)
                    .on_input(Message::ApiKeyChanged)
                    .secure(true)
                    .padding(10),
            ]
            .spacing(8),
        )
        .padding(12)
        .style(container::rounded_box)
        .width(Length::Fill),
    );

    if let Some(photo) = photo {
        content = content.push(
            row![
                image(image::Handle::from_bytes(photo.jpeg.clone())).width(Length::Fixed(64.0)),
                column![
                    text("Your Photo").size(14),
                    text("This will be used to create your personalized vision").size(12),
                ]
                .spacing(4),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        );
    }

    if let Some(goal) = goal {
        content = content.push(
            container(column![text("Your Goal:").size(14), text(format!("\"{goal}\"")).size(13)].spacing(4))
                .padding(12)
                .style(container::rounded_box)
                .width(Length::Fill),
        );
    }

    if generating {
        content = content.push(
            column![
                text(stage).size(15),
                progress_bar(0.0..=100.0, progress).height(Length::Fixed(8.0)),
                text("Creating your personalized vision...").size(12),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .width(Length::Fill),
        );
    }

    if let Some(error) = error {
        content = content.push(
            text(error.to_string())
                .size(13)
                .color(Color::from_rgb(0.9, 0.3, 0.3)),
        );
    }

    let can_generate = !generating && !api_key.trim().is_empty();
    content = content.push(
        button(text(if generating {
            "✨ Generating Vision..."
        } else {
            "✨ Generate My Personalized Vision"
        }))
        .on_press_maybe(can_generate.then_some(Message::StartGeneration))
        .padding(12),
    );

    container(content).center_x(Length::Fill).into()
}
