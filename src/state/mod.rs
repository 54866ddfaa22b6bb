/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The session context and workflow state machine (session.rs)
/// - The in-memory vision gallery (gallery.rs)

pub mod data;
pub mod gallery;
pub mod session;
