/// Step-indicator header
///
/// Shows the four workflow steps with the active one highlighted.

use iced::widget::{container, text, Row};
use iced::{Alignment, Element, Length, Theme};

use crate::state::session::FlowStep;
use crate::Message;

fn icon(step: FlowStep) -> &'static str {
    match step {
        FlowStep::Capture => "📷",
        FlowStep::Goal => "🎯",
        FlowStep::Generate => "✨",
        FlowStep::Gallery => "👁",
    }
}

fn label(step: FlowStep) -> &'static str {
    match step {
        FlowStep::Capture => "Capture Photo",
        FlowStep::Goal => "Set Goal",
        FlowStep::Generate => "Generate Vision",
        FlowStep::Gallery => "View Visions",
    }
}

pub fn view(active: FlowStep) -> Element<'static, Message> {
    let mut indicator = Row::new().spacing(16).align_y(Alignment::Center);

    for step in FlowStep::ALL {
        let is_active = step == active;

        let style: fn(&Theme) -> container::Style = if is_active {
            container::rounded_box
        } else {
            container::transparent
        };

        let marker = container(
            text(format!("{} {}", icon(step), label(step))).size(if is_active { 16 } else { 14 }),
        )
        .padding(8)
        .style(style);

        indicator = indicator.push(marker);
    }

    container(indicator).center_x(Length::Fill).into()
}
