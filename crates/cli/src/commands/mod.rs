//! Subcommand implementations

pub mod audio;
pub mod report;
pub mod target;
pub mod video;
