//! Configuration module
//!
//! - Path resolution for the data files
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
