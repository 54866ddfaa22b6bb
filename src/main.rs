use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, scrollable, text};
use iced::{Alignment, Element, Length, Task, Theme};
use uuid::Uuid;

mod camera;
mod download;
mod error;
mod generate;
mod goal;
mod share;
mod state;
mod ui;

use camera::{CaptureController, SimulatedCamera};
use error::{DownloadError, GenerateError, GoalError, ShareError};
use generate::{
    GenerationEvent, GenerationRequest, RunwareProvider, SimulatedProvider, VisionProvider,
    STAGE_PREPARING,
};
use state::gallery::GalleryStore;
use state::session::{FlowStep, Session};

/// Main application state
///
/// This is the workflow controller: it owns the session context, the
/// gallery, and the per-step UI state, and sequences the four steps
/// through message dispatch.
struct VisionBoard {
    /// Current step plus the photo and goal moving through the flow
    session: Session,
    /// All visions generated this session, newest first
    gallery: GalleryStore,
    /// Camera stream lifecycle and the held still
    capture: CaptureController,
    /// The generation service collaborator, chosen at startup
    provider: Arc<dyn VisionProvider>,
    /// Goal text being typed, not yet validated
    goal_draft: String,
    /// Inline validation feedback for the goal input
    goal_error: Option<GoalError>,
    /// Credential for the generation provider
    api_key: String,
    /// True while a generation is outstanding; blocks re-submission
    generating: bool,
    /// Progress of the in-flight generation, 0..=100
    progress: f32,
    /// Stage label of the in-flight generation
    stage: String,
    /// Last generation failure, shown until the next attempt
    generate_error: Option<GenerateError>,
    /// Fetched image bytes for gallery cards, keyed by vision id
    previews: HashMap<Uuid, Handle>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    // Capture step
    /// User asked to start the camera
    StartCamera,
    /// The auto-capture delay elapsed for the given session epoch
    AutoCapture(u64),
    /// User pressed the shutter manually
    CapturePhoto,
    /// User discarded the still and wants a fresh stream
    RetakePhoto,
    /// User accepted the still; the flow advances
    ConfirmPhoto,

    // Goal step
    GoalDraftChanged(String),
    /// User clicked an example goal card
    UseExampleGoal(usize),
    SubmitGoal,

    // Generate step
    ApiKeyChanged(String),
    StartGeneration,
    /// An event from the in-flight generation, stamped with its epoch
    Generation(u64, Result<GenerationEvent, GenerateError>),

    // Gallery step
    DownloadVision(Uuid),
    DownloadFinished(Result<PathBuf, DownloadError>),
    ShareVision(Uuid),
    /// Image bytes arrived for a gallery card preview
    PreviewLoaded(Uuid, Result<Vec<u8>, DownloadError>),

    // Any step
    StartOver,
}

impl VisionBoard {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let provider: Arc<dyn VisionProvider> =
            match std::env::var("VISION_BOARD_PROVIDER").as_deref() {
                Ok("simulated") => {
                    println!("🧪 Using the simulated generation provider");
                    Arc::new(SimulatedProvider::default())
                }
                _ => Arc::new(RunwareProvider::new()),
            };

        println!("🎨 Vision Board AI initialized");

        (
            VisionBoard {
                session: Session::new(),
                gallery: GalleryStore::new(),
                capture: CaptureController::new(Box::new(SimulatedCamera::new())),
                provider,
                goal_draft: String::new(),
                goal_error: None,
                api_key: String::new(),
                generating: false,
                progress: 0.0,
                stage: STAGE_PREPARING.to_string(),
                generate_error: None,
                previews: HashMap::new(),
                status: "Ready to capture your photo.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::StartCamera => {
                if self.session.step() != FlowStep::Capture {
                    return Task::none();
                }
                self.begin_capture()
            }
            Message::AutoCapture(epoch) => {
                // The timer may outlive a reset or a manual capture;
                // only fire if nothing changed underneath it.
                if !self.session.is_current(epoch)
                    || self.session.step() != FlowStep::Capture
                    || !self.capture.is_stream_active()
                {
                    return Task::none();
                }
                self.take_photo();
                Task::none()
            }
            Message::CapturePhoto => {
                if self.session.step() != FlowStep::Capture {
                    return Task::none();
                }
                self.take_photo();
                Task::none()
            }
            Message::RetakePhoto => {
                if self.session.step() != FlowStep::Capture {
                    return Task::none();
                }
                match self.capture.retake() {
                    Ok(()) => self.armed_shutter_task(),
                    Err(e) => {
                        eprintln!("❌ {e}");
                        self.status =
                            "Unable to access camera. Please check permissions.".to_string();
                        Task::none()
                    }
                }
            }
            Message::ConfirmPhoto => {
                if let Some(photo) = self.capture.confirm() {
                    if self.session.photo_captured(photo) {
                        self.status = "Photo captured successfully!".to_string();
                    }
                }
                Task::none()
            }

            Message::GoalDraftChanged(draft) => {
                if self.session.step() == FlowStep::Goal {
                    self.goal_draft = draft;
                    self.goal_error = None;
                }
                Task::none()
            }
            Message::UseExampleGoal(index) => {
                if self.session.step() == FlowStep::Goal {
                    if let Some(example) = goal::EXAMPLE_GOALS.get(index) {
                        self.goal_draft = example.to_string();
                        self.goal_error = None;
                    }
                }
                Task::none()
            }
            Message::SubmitGoal => {
                if self.session.step() != FlowStep::Goal {
                    return Task::none();
                }
                match goal::submit(&self.goal_draft) {
                    Ok(goal) => {
                        if self.session.goal_submitted(goal) {
                            self.goal_error = None;
                            self.status = "Goal saved! Generating your vision...".to_string();
                        }
                    }
                    Err(e) => {
                        // Validation errors never advance the flow
                        self.goal_error = Some(e);
                    }
                }
                Task::none()
            }

            Message::ApiKeyChanged(key) => {
                if self.session.step() == FlowStep::Generate && !self.generating {
                    self.api_key = key;
                }
                Task::none()
            }
            Message::StartGeneration => self.start_generation(),
            Message::Generation(epoch, event) => self.on_generation_event(epoch, event),

            Message::DownloadVision(id) => {
                let Some(vision) = self.gallery.get(id) else {
                    return Task::none();
                };
                let goal_text = vision.goal.clone();
                let url = vision.image_url.clone();

                let Some(path) = download::pick_save_path(&goal_text) else {
                    self.status = "Download cancelled.".to_string();
                    return Task::none();
                };
                Task::perform(download::save_image(url, path), Message::DownloadFinished)
            }
            Message::DownloadFinished(result) => {
                match result {
                    Ok(path) => {
                        self.status = format!("💾 Image saved to {}", path.display());
                    }
                    Err(e) => {
                        // Peripheral failure, never blocks the workflow
                        eprintln!("⚠️  {e}");
                        self.status = e.to_string();
                    }
                }
                Task::none()
            }
            Message::ShareVision(id) => {
                let Some(vision) = self.gallery.get(id) else {
                    return Task::none();
                };
                let attempt = share::native_share(vision);
                let summary = share::share_summary(vision);

                match attempt {
                    Ok(()) => {
                        self.status = "Vision shared!".to_string();
                        Task::none()
                    }
                    Err(ShareError::Unavailable) => {
                        // Fall back to copying a textual summary
                        self.status = "📋 Copying vision details to clipboard...".to_string();
                        iced::clipboard::write(summary)
                    }
                }
            }
            Message::PreviewLoaded(id, result) => {
                match result {
                    Ok(bytes) => {
                        self.previews.insert(id, Handle::from_bytes(bytes));
                    }
                    Err(e) => {
                        // The card falls back to a placeholder
                        eprintln!("⚠️  Failed to load preview: {e}");
                    }
                }
                Task::none()
            }

            Message::StartOver => {
                if self.session.step() == FlowStep::Capture {
                    return Task::none();
                }
                self.reset_flow();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = column![
            text("Vision Board AI").size(40),
            text("Capture your photo, share your dreams, and see yourself achieving your goals through AI")
                .size(15),
        ]
        .spacing(8)
        .align_x(Alignment::Center);

        let steps = ui::steps::view(self.session.step());

        let body: Element<Message> = match self.session.step() {
            FlowStep::Capture => ui::capture::view(&self.capture),
            FlowStep::Goal => ui::goal::view(
                &self.goal_draft,
                self.session.photo(),
                self.goal_error.as_ref(),
            ),
            FlowStep::Generate => ui::generate::view(
                self.session.photo(),
                self.session.goal(),
                &self.api_key,
                self.generating,
                self.progress,
                &self.stage,
                self.generate_error.as_ref(),
            ),
            FlowStep::Gallery => ui::gallery::view(&self.gallery, &self.previews),
        };

        let mut content = column![header, steps, body]
            .spacing(24)
            .padding(32)
            .align_x(Alignment::Center)
            .width(Length::Fill);

        if self.session.step() != FlowStep::Capture {
            content = content.push(button(text("Start Over")).on_press(Message::StartOver).padding(10));
        }

        content = content.push(text(&self.status).size(13));

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }

    /// Request a camera stream and, on success, arm the auto-shutter
    fn begin_capture(&mut self) -> Task<Message> {
        match self.capture.request_stream() {
            Ok(()) => self.armed_shutter_task(),
            Err(e) => {
                eprintln!("❌ {e}");
                self.status = "Unable to access camera. Please check permissions.".to_string();
                // Stay in Capture; the user may try again
                Task::none()
            }
        }
    }

    /// Schedule the auto-capture timer if the policy enables it
    fn armed_shutter_task(&mut self) -> Task<Message> {
        self.status = "Camera started. Hold still...".to_string();
        match self.capture.auto_capture_delay() {
            Some(delay) => {
                let epoch = self.session.epoch();
                Task::perform(tokio::time::sleep(delay), move |_| {
                    Message::AutoCapture(epoch)
                })
            }
            None => Task::none(),
        }
    }

    fn take_photo(&mut self) {
        if let Some(photo) = self.capture.capture() {
            self.status = format!("Captured a {}x{} still.", photo.width, photo.height);
        }
    }

    /// Kick off one generation as a progress stream
    fn start_generation(&mut self) -> Task<Message> {
        if self.session.step() != FlowStep::Generate || self.generating {
            return Task::none();
        }
        let (photo, goal) = match (self.session.photo(), self.session.goal()) {
            (Some(photo), Some(goal)) => (photo, goal),
            _ => return Task::none(),
        };

        let request = GenerationRequest::new(photo, goal, self.api_key.clone());

        self.generating = true;
        self.progress = 0.0;
        self.stage = STAGE_PREPARING.to_string();
        self.generate_error = None;
        self.status = "Connecting to the generation service...".to_string();

        let epoch = self.session.epoch();
        Task::run(
            generate::generate(self.provider.clone(), request),
            move |event| Message::Generation(epoch, event),
        )
    }

    fn on_generation_event(
        &mut self,
        epoch: u64,
        event: Result<GenerationEvent, GenerateError>,
    ) -> Task<Message> {
        // Results that arrive after a reset belong to a superseded
        // session and are discarded.
        if !self.session.is_current(epoch) {
            return Task::none();
        }

        match event {
            Ok(GenerationEvent::Progress { percent, stage }) => {
                self.progress = f32::from(percent);
                self.stage = stage;
                Task::none()
            }
            Ok(GenerationEvent::Completed(vision)) => {
                self.generating = false;
                self.progress = 100.0;
                self.status = "✨ Your personalized vision has been generated!".to_string();

                let id = vision.id;
                let url = vision.image_url.clone();
                self.gallery.add(vision);
                self.session.vision_generated();

                // Fetch the image for the gallery card in the background
                Task::perform(download::fetch_image(url), move |result| {
                    Message::PreviewLoaded(id, result)
                })
            }
            Err(e) => {
                eprintln!("❌ Generation failed: {e}");
                // Reset so a retry starts clean; stay on this step
                self.generating = false;
                self.progress = 0.0;
                self.stage = STAGE_PREPARING.to_string();
                self.generate_error = Some(e);
                Task::none()
            }
        }
    }

    /// Return to Capture, clearing the current photo and goal.
    /// The gallery is untouched.
    fn reset_flow(&mut self) {
        self.capture.reset();
        self.session.reset();
        self.goal_draft.clear();
        self.goal_error = None;
        self.generating = false;
        self.progress = 0.0;
        self.stage = STAGE_PREPARING.to_string();
        self.generate_error = None;
        self.status = "Ready to capture your photo.".to_string();
    }
}

fn main() -> iced::Result {
    iced::application("Vision Board AI", VisionBoard::update, VisionBoard::view)
        .theme(VisionBoard::theme)
        .centered()
        .run_with(VisionBoard::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use generate::{STAGE_APPLYING_FACE, STAGE_GENERATING};
    use state::data::{CapturedPhoto, Vision};

    fn app() -> VisionBoard {
        VisionBoard::new().0
    }

    fn photo() -> CapturedPhoto {
        CapturedPhoto {
            jpeg: vec![1, 2, 3],
            width: 640,
            height: 480,
        }
    }

    fn advance_to_generate(app: &mut VisionBoard) {
        assert!(app.session.photo_captured(photo()));
        assert!(app
            .session
            .goal_submitted(goal::submit("Running my own bakery").unwrap()));
        assert_eq!(app.session.step(), FlowStep::Generate);
    }

    #[test]
    fn test_generation_failure_resets_progress_and_stays_on_generate() {
        let mut app = app();
        advance_to_generate(&mut app);
        app.generating = true;
        app.progress = 50.0;
        app.stage = STAGE_GENERATING.to_string();

        let _ = app.update(Message::Generation(
            app.session.epoch(),
            Err(GenerateError::Failed("upstream exploded".to_string())),
        ));

        assert!(!app.generating);
        assert_eq!(app.progress, 0.0);
        assert_eq!(app.stage, STAGE_PREPARING);
        assert_eq!(app.session.step(), FlowStep::Generate);
        assert_eq!(
            app.generate_error,
            Some(GenerateError::Failed("upstream exploded".to_string()))
        );
    }

    #[test]
    fn test_stale_generation_events_are_discarded_after_reset() {
        let mut app = app();
        advance_to_generate(&mut app);
        app.generating = true;
        let stale = app.session.epoch();
        app.reset_flow();

        let _ = app.update(Message::Generation(
            stale,
            Ok(GenerationEvent::Progress {
                percent: 80,
                stage: STAGE_APPLYING_FACE.to_string(),
            }),
        ));
        let _ = app.update(Message::Generation(
            stale,
            Ok(GenerationEvent::Completed(Vision::new(
                "https://im.runware.ai/x.webp".to_string(),
                "Running my own bakery".to_string(),
            ))),
        ));

        // The superseded generation left no trace
        assert_eq!(app.session.step(), FlowStep::Capture);
        assert!(!app.generating);
        assert_eq!(app.progress, 0.0);
        assert_eq!(app.stage, STAGE_PREPARING);
        assert!(app.gallery.is_empty());
    }

    #[test]
    fn test_start_over_works_while_a_generation_is_outstanding() {
        let mut app = app();
        advance_to_generate(&mut app);
        app.generating = true;
        app.progress = 50.0;
        let stale = app.session.epoch();

        let _ = app.update(Message::StartOver);

        assert_eq!(app.session.step(), FlowStep::Capture);
        assert!(!app.generating);
        assert!(app.session.photo().is_none());
        // The outstanding generation's epoch is no longer current
        assert!(!app.session.is_current(stale));
    }

    #[test]
    fn test_share_falls_back_to_the_clipboard() {
        let mut app = app();
        let vision = Vision::new(
            "https://im.runware.ai/x.webp".to_string(),
            "Publishing my first bestselling novel".to_string(),
        );
        let id = vision.id;
        app.gallery.add(vision);

        let _ = app.update(Message::ShareVision(id));

        assert_eq!(app.status, "📋 Copying vision details to clipboard...");
    }
}
