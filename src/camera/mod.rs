/// Camera capture module
///
/// This module handles:
/// - The camera collaborator seam (source.rs)
/// - Stream lifecycle, still capture and retake decisions (controller.rs)

pub mod controller;
pub mod source;

pub use controller::CaptureController;
pub use source::{CameraSource, CameraStream, Facing, SimulatedCamera, StreamConstraints};
