/// UI module
///
/// One view per workflow step plus the step-indicator header. Views are
/// pure functions from state to `Element`; all behavior flows back to
/// the update loop as messages.

pub mod capture;
pub mod gallery;
pub mod generate;
pub mod goal;
pub mod steps;
