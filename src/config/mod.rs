//! Configuration for envjob.
//!
//! Settings come from three layers: built-in defaults, an optional YAML file
//! given with `--config`, and command-line flags.

mod model;
mod operations;


pub use model::{Config, ConfigOverrides};
