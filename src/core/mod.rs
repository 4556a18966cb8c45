//! Core business logic abstractions

pub mod analytics;
pub mod cache;
pub mod config;
pub mod log;
pub mod model;
pub mod parser;
pub mod project;

// Re-export main types for cleaner imports
pub use cache::{Cache, Clock, ManualClock, SystemClock};
pub use model::{Category, ProjectData, ProjectSnapshot};
pub use project::ProjectProvider;
