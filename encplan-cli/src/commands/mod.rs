//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// `resolve`: crop, geometry and audio report for one job
pub mod resolve;

/// `bitrate`: target-size video bitrate
pub mod bitrate;

/// `filesize`: size estimate for a video bitrate
pub mod filesize;

/// `batch`: parallel resolution of several jobs
pub mod batch;

pub use batch::run_batch;
pub use bitrate::run_bitrate;
pub use filesize::run_filesize;
pub use resolve::run_resolve;
