//! Startup loader for a robotics vision co-processor.
//!
//! Reads the JSON rig descriptor (team number, network-state mode, cameras
//! and switched cameras), then hands the resulting [`Configuration`] to the
//! network-state and camera-server collaborators.

pub mod app_config;
pub mod camera;
pub mod camera_config;
pub mod cli;
pub mod common;
pub mod config_loader;
pub mod core;
pub mod errors;

pub use app_config::{Configuration, NtMode};
pub use camera_config::{CameraConfig, SwitchedCameraConfig};
pub use config_loader::{load_config, load_config_with_report, ConfigLoader, LoadReport};
pub use errors::{AppError, ConfigError, ConfigWarning};
