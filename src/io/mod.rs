/// Command-line driver
pub mod cli;
/// Defaults and fixed editor constants
pub mod configuration;
/// Error types
pub mod error;
/// PNG loading and export
pub mod image;
/// Progress display for stroke replay
pub mod progress;
