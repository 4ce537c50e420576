//! Shared environment, logging, and configuration utilities for the fairdiv workspace.

pub mod env_utils;
pub mod logging;

pub use env_utils::{fairdiv_dir, resolve_output_path, EnvError};
pub use logging::init_logging;
