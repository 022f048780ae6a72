pub mod switched;

pub use crate::camera_config::{CameraConfig, SwitchedCameraConfig};
