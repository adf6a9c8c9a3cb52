//! Exit code constants for the envjob CLI.
//!
//! - 0: Success
//! - 1: Configuration error (bad config file or flag values)
//! - 2: Input error (env file or template unreadable)
//! - 3: Output error (generated job file could not be written)
//! - 4: Placeholder missing from template (strict mode only)
//! - 5: Scheduler launch failure (strict mode only)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Invalid configuration file or flag values.
pub const CONFIG_ERROR: i32 = 1;

/// The env file or the job template could not be read.
pub const INPUT_ERROR: i32 = 2;

/// The generated job specification could not be written.
pub const OUTPUT_ERROR: i32 = 3;

/// The template did not contain the placeholder token.
pub const PLACEHOLDER_MISSING: i32 = 4;

/// The scheduler could not be started or exited unsuccessfully.
pub const LAUNCH_FAILURE: i32 = 5;
