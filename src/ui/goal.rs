/// Goal step view
///
/// Photo preview, the goal input with a live character counter, inline
/// validation feedback, and example goals that pre-fill the input.

use iced::widget::{button, column, container, image, text, text_input, Column};
use iced::{Alignment, Color, Element, Length};

use crate::error::GoalError;
use crate::goal::{EXAMPLE_GOALS, GOAL_MAX_LEN};
use crate::state::data::CapturedPhoto;
use crate::Message;

pub fn view<'a>(
    draft: &'a str,
    photo: Option<&'a CapturedPhoto>,
    error: Option<&'a GoalError>,
) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(16)
        .align_x(Alignment::Center)
        .max_width(640);

    content = content.push(
        column![
            text("Share Your Goal").size(24),
            text("What future achievement would you like to visualize?").size(14),
        ]
        .spacing(6)
        .align_x(Alignment::Center),
    );

    if let Some(photo) = photo {
        content = content.push(
            image(image::Handle::from_bytes(photo.jpeg.clone())).width(Length::Fixed(128.0)),
        );
    }

    content = content.push(
        text_input(
            "Describe your dream achievement in detail... (e.g., 'Running my own successful bakery with customers lined up outside')",
            draft,
        )
        .on_input(Message::GoalDraftChanged)
        .padding(10),
    );

    content = content.push(
        text(format!("{}/{} characters", draft.chars().count(), GOAL_MAX_LEN)).size(12),
    );

    if let Some(error) = error {
        content = content.push(
            text(error.to_string())
                .size(13)
                .color(Color::from_rgb(0.9, 0.3, 0.3)),
        );
    }

    content = content.push(
        button(text("Generate My Vision →"))
            .on_press_maybe((!draft.trim().is_empty()).then_some(Message::SubmitGoal))
            .padding(12),
    );

    // Example goals, pre-fill only
    let mut examples = Column::new().spacing(4).align_x(Alignment::Start);
    examples = examples.push(text("Need inspiration? Try these examples:").size(13));
    for (index, example) in EXAMPLE_GOALS.iter().enumerate() {
        examples = examples.push(
            button(text(*example).size(13))
                .style(button::text)
                .on_press(Message::UseExampleGoal(index)),
        );
    }
    content = content.push(examples);

    container(content).center_x(Length::Fill).into()
}
