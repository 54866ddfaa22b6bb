/// Capture step view
///
/// Three substates: idle (offer to start the camera), streaming (the
/// shutter is about to fire or can be pressed manually), and reviewing
/// a captured still (retake or confirm).

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Element, Length};

use crate::camera::CaptureController;
use crate::Message;

pub fn view(capture: &CaptureController) -> Element<'_, Message> {
    let heading = column![
        text("Take Your Photo").size(24),
        text("Let's capture your current self to visualize your future success").size(14),
    ]
    .spacing(6)
    .align_x(Alignment::Center);

    let body: Element<Message> = if let Some(still) = capture.still() {
        let preview = image(image::Handle::from_bytes(still.jpeg.clone()))
            .width(Length::Fixed(360.0));

        column![
            preview,
            row![
                button(text("↺ Retake")).on_press(Message::RetakePhoto).padding(10),
                button(text("✔ Use This Photo"))
                    .on_press(Message::ConfirmPhoto)
                    .padding(10),
            ]
            .spacing(12),
        ]
        .spacing(16)
        .align_x(Alignment::Center)
        .into()
    } else if capture.is_stream_active() {
        column![
            text("Capturing photo...").size(16),
            text("Hold still, the shutter fires in a moment").size(13),
            button(text("Capture Now"))
                .on_press(Message::CapturePhoto)
                .padding(10),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
    } else {
        column![
            text("📷").size(48),
            text("Ready to capture your photo?").size(15),
            button(text("Take Photo Now"))
                .on_press(Message::StartCamera)
                .padding(10),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
    };

    container(
        column![heading, body]
            .spacing(24)
            .align_x(Alignment::Center),
    )
    .center_x(Length::Fill)
    .into()
}
