/// Capture controller
///
/// Drives the camera collaborator through the capture step: acquire a
/// stream, snapshot a still frame, and hold it until the user retakes or
/// confirms. The invariant throughout is that at most one stream is open
/// at a time and that a successful capture releases the device before
/// returning.

use std::time::Duration;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::camera::source::{CameraSource, CameraStream, StreamConstraints};
use crate::error::CameraError;
use crate::state::data::CapturedPhoto;

/// Fallback dimensions used when a stream reports (0, 0) because its
/// metadata has not loaded yet
pub const DEFAULT_CAPTURE_WIDTH: u32 = 640;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 480;

/// JPEG quality for encoded stills (matches the ~0.8 canvas quality)
const JPEG_QUALITY: u8 = 80;

/// Delay before the shutter fires automatically once a stream is live
const DEFAULT_AUTO_CAPTURE_DELAY: Duration = Duration::from_millis(1000);

pub struct CaptureController {
    source: Box<dyn CameraSource>,
    constraints: StreamConstraints,
    stream: Option<Box<dyn CameraStream>>,
    still: Option<CapturedPhoto>,
    auto_capture_delay: Option<Duration>,
}

impl CaptureController {
    /// Create a controller over a camera source with default constraints
    /// (1280x720 ideal, front-facing) and auto-capture enabled
    pub fn new(source: Box<dyn CameraSource>) -> Self {
        Self {
            source,
            constraints: StreamConstraints::default(),
            stream: None,
            still: None,
            auto_capture_delay: Some(DEFAULT_AUTO_CAPTURE_DELAY),
        }
    }

    /// How long to wait before auto-capturing, or None for manual only
    pub fn auto_capture_delay(&self) -> Option<Duration> {
        self.auto_capture_delay
    }

    pub fn set_auto_capture_delay(&mut self, delay: Option<Duration>) {
        self.auto_capture_delay = delay;
    }

    /// Ask the camera collaborator for a live stream
    ///
    /// Any previously open stream is released first, so only one stream
    /// ever exists. On failure the caller stays where it is; there is no
    /// automatic retry.
    pub fn request_stream(&mut self) -> Result<(), CameraError> {
        self.release_stream();
        let stream = self.source.open(&self.constraints)?;
        self.stream = Some(stream);
        Ok(())
    }

    /// True while a live stream is held
    pub fn is_stream_active(&self) -> bool {
        self.stream.as_ref().map(|s| s.is_active()).unwrap_or(false)
    }

    /// Snapshot the current frame into an encoded still
    ///
    /// Valid only while streaming. Calling this with no active stream is
    /// a no-op that only logs. If the stream has not reported its
    /// dimensions yet the still falls back to 640x480.
    ///
    /// On success the stream is stopped and released before the photo is
    /// returned, so the camera hardware lock is never held past capture.
    pub fn capture(&mut self) -> Option<CapturedPhoto> {
        let Some(stream) = self.stream.as_mut() else {
            eprintln!("⚠️  capture() called with no active stream");
            return None;
        };

        let (mut width, mut height) = stream.dimensions();
        if width == 0 || height == 0 {
            width = DEFAULT_CAPTURE_WIDTH;
            height = DEFAULT_CAPTURE_HEIGHT;
        }

        let frame = match stream.frame() {
            Ok(frame) => frame,
            Err(e) => {
                eprintln!("⚠️  Failed to grab frame: {e}");
                return None;
            }
        };

        // Raster sized to the stream's native dimensions
        let frame = if frame.dimensions() == (width, height) {
            frame
        } else {
            image::imageops::resize(&frame, width, height, FilterType::Lanczos3)
        };

        let mut jpeg = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
        if let Err(e) = encoder.encode_image(&frame) {
            eprintln!("⚠️  Failed to encode still: {e}");
            return None;
        }

        // Release the device before handing the still back
        stream.stop();
        self.stream = None;

        let photo = CapturedPhoto {
            jpeg,
            width,
            height,
        };
        println!(
            "📸 Captured still frame ({}x{}, {} bytes)",
            width,
            height,
            photo.jpeg.len()
        );

        self.still = Some(photo.clone());
        Some(photo)
    }

    /// The held still, if one has been captured
    pub fn still(&self) -> Option<&CapturedPhoto> {
        self.still.as_ref()
    }

    /// Discard the current still and ask for a fresh stream
    pub fn retake(&mut self) -> Result<(), CameraError> {
        self.still = None;
        self.request_stream()
    }

    /// Hand the still to the workflow. Only meaningful once a still
    /// exists; returns None otherwise.
    pub fn confirm(&self) -> Option<CapturedPhoto> {
        self.still.clone()
    }

    /// Tear down: release the stream and drop any held still
    pub fn reset(&mut self) {
        self.release_stream();
        self.still = None;
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }
}

impl std::fmt::Debug for CaptureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureController")
            .field("streaming", &self.is_stream_active())
            .field("has_still", &self.still.is_some())
            .finish()
    }
}
