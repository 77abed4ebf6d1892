//! API Lambda handler and request processing

pub mod app_info;
pub mod feedback;
pub mod handler;
pub mod helpers;
pub mod parsing;

// Re-export the main handler for convenience
pub use handler::{AppState, handler};
