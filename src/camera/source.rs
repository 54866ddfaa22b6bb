/// Camera collaborator seam
///
/// The platform camera is an external collaborator, so it sits behind a
/// pair of traits: [`CameraSource`] opens streams and [`CameraStream`] is
/// one live feed. The in-tree [`SimulatedCamera`] produces synthetic
/// frames so the whole flow works without hardware; real backends plug in
/// behind the same traits.

use image::{Rgb, RgbImage};

use crate::error::CameraError;

/// Which way the camera should face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Front,
    Back,
}

/// Requested stream parameters
///
/// Dimensions are "ideal" hints the way browser constraints are: the
/// opened stream may report different native dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub facing: Facing,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            ideal_width: 1280,
            ideal_height: 720,
            facing: Facing::Front,
        }
    }
}

/// A live camera feed
///
/// At most one stream may be active per controller. `stop()` must release
/// the underlying device so the hardware lock is never leaked.
pub trait CameraStream: Send {
    /// Native frame dimensions. May report (0, 0) while stream metadata
    /// has not loaded yet; callers fall back to a default resolution.
    fn dimensions(&self) -> (u32, u32);

    /// Grab the current frame as raw RGB pixels
    fn frame(&mut self) -> Result<RgbImage, CameraError>;

    /// Release the underlying device
    fn stop(&mut self);

    /// True while the feed is live
    fn is_active(&self) -> bool;
}

/// Something that can open camera streams
pub trait CameraSource: Send + Sync {
    fn open(&self, constraints: &StreamConstraints) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// A synthetic camera for development and tests
///
/// Produces animated gradient frames at the constrained resolution.
/// Can be configured to simulate a denied permission or a stream that
/// has not reported its dimensions yet.
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    available: bool,
    resolution: Option<(u32, u32)>,
}

impl SimulatedCamera {
    /// A camera that grants access and honors the ideal resolution
    pub fn new() -> Self {
        Self {
            available: true,
            resolution: None,
        }
    }

    /// A camera that denies access, as if permission were refused
    /// or no device were present
    pub fn unavailable() -> Self {
        Self {
            available: false,
            resolution: None,
        }
    }

    /// A camera that reports a fixed resolution regardless of the
    /// requested constraints. (0, 0) simulates missing metadata.
    pub fn with_resolution(width: u32, height: u32) -> Self {
        Self {
            available: true,
            resolution: Some((width, height)),
        }
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSource for SimulatedCamera {
    fn open(&self, constraints: &StreamConstraints) -> Result<Box<dyn CameraStream>, CameraError> {
        if !self.available {
            return Err(CameraError::Unavailable(
                "permission denied or no camera present".to_string(),
            ));
        }

        let (width, height) = self
            .resolution
            .unwrap_or((constraints.ideal_width, constraints.ideal_height));

        println!(
            "🎥 Camera stream opened ({}x{}, {:?})",
            width, height, constraints.facing
        );

        Ok(Box::new(SimulatedStream {
            width,
            height,
            active: true,
            ticks: 0,
        }))
    }
}

struct SimulatedStream {
    width: u32,
    height: u32,
    active: bool,
    ticks: u32,
}

impl CameraStream for SimulatedStream {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame(&mut self) -> Result<RgbImage, CameraError> {
        if !self.active {
            return Err(CameraError::NotStreaming);
        }

        self.ticks += 1;
        let t = self.ticks;

        // A stream that never loaded metadata still yields frames at a
        // sane default size, like a real feed would.
        let width = if self.width == 0 { 640 } else { self.width };
        let height = if self.height == 0 { 480 } else { self.height };

        Ok(RgbImage::from_fn(width, height, move |x, y| {
            let r = ((x + t * 3) % 256) as u8;
            let g = ((y + t * 5) % 256) as u8;
            let b = ((x + y) % 256) as u8;
            Rgb([r, g, b])
        }))
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_camera_fails_to_open() {
        let camera = SimulatedCamera::unavailable();
        let result = camera.open(&StreamConstraints::default());
        assert!(matches!(result, Err(CameraError::Unavailable(_))));
    }

    #[test]
    fn test_stream_honors_ideal_resolution() {
        let camera = SimulatedCamera::new();
        let stream = camera.open(&StreamConstraints::default()).unwrap();
        assert_eq!(stream.dimensions(), (1280, 720));
        assert!(stream.is_active());
    }

    #[test]
    fn test_stopped_stream_refuses_frames() {
        let camera = SimulatedCamera::new();
        let mut stream = camera.open(&StreamConstraints::default()).unwrap();
        stream.stop();
        assert!(!stream.is_active());
        assert_eq!(stream.frame().unwrap_err(), CameraError::NotStreaming);
    }

    #[test]
    fn test_frames_match_stream_dimensions() {
        let camera = SimulatedCamera::with_resolution(320, 240);
        let mut stream = camera.open(&StreamConstraints::default()).unwrap();
        let frame = stream.frame().unwrap();
        assert_eq!(frame.dimensions(), (320, 240));
    }
}
