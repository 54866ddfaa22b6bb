/// Session context and workflow state machine
///
/// The four-step flow is Capture -> Goal -> Generate -> Gallery, with a
/// reset transition from any step back to Capture. The session owns the
/// photo and goal currently moving through the flow; the gallery lives
/// outside the session so a reset never touches it.

use crate::goal::Goal;
use crate::state::data::CapturedPhoto;

/// One step of the guided workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Capture,
    Goal,
    Generate,
    Gallery,
}

impl FlowStep {
    /// All steps in workflow order, for the step-indicator header
    pub const ALL: [FlowStep; 4] = [
        FlowStep::Capture,
        FlowStep::Goal,
        FlowStep::Generate,
        FlowStep::Gallery,
    ];
}

/// The session context passed through the workflow
///
/// Exactly one photo and one goal are "current" at a time. Transition
/// methods return false when invoked from the wrong step, so actions
/// belonging to other steps can never advance the flow.
#[derive(Debug)]
pub struct Session {
    step: FlowStep,
    photo: Option<CapturedPhoto>,
    goal: Option<Goal>,
    epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            step: FlowStep::Capture,
            photo: None,
            goal: None,
            epoch: 0,
        }
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn photo(&self) -> Option<&CapturedPhoto> {
        self.photo.as_ref()
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    /// The current session epoch, stamped into async work so stragglers
    /// from before a reset can be recognized and discarded
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True iff an async result stamped with `epoch` is still relevant
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// Capture succeeded: carry the photo forward and advance to Goal
    pub fn photo_captured(&mut self, photo: CapturedPhoto) -> bool {
        if self.step != FlowStep::Capture {
            return false;
        }
        self.photo = Some(photo);
        self.step = FlowStep::Goal;
        true
    }

    /// Goal submitted: carry it forward and advance to Generate.
    /// The photo must still be held from the capture step.
    pub fn goal_submitted(&mut self, goal: Goal) -> bool {
        if self.step != FlowStep::Goal || self.photo.is_none() {
            return false;
        }
        self.goal = Some(goal);
        self.step = FlowStep::Generate;
        true
    }

    /// A vision was produced: advance to the gallery.
    /// The caller is responsible for adding the vision to the gallery.
    pub fn vision_generated(&mut self) -> bool {
        if self.step != FlowStep::Generate {
            return false;
        }
        self.step = FlowStep::Gallery;
        true
    }

    /// Clear the current photo and goal and return to Capture.
    ///
    /// Bumps the epoch so results of outstanding async calls started
    /// before the reset are discarded when they arrive. The gallery is
    /// not owned here and is never affected.
    pub fn reset(&mut self) {
        self.photo = None;
        self.goal = None;
        self.step = FlowStep::Capture;
        self.epoch += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
