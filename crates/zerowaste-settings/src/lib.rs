//! Zero-waste settings
//!
//! Loads and saves the settings file shared by the command-line tools.

pub mod config;

pub use config::{default_output_dir, Config, OutputSettings, PatternSettings};
