//! Filesystem utilities for envjob.

pub mod atomic;

pub use atomic::atomic_write_file;
