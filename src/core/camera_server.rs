use crate::camera_config::CameraConfig;
use crate::errors::AppError;
use async_trait::async_trait;

/// Handle to a physical camera source opened by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u32);

/// Handle to a virtual (switched) MJPEG stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwitchedId(pub u32);

/// Camera-server subsystem that opens devices and publishes MJPEG streams.
#[async_trait]
pub trait CameraServer: Send + Sync {
    /// Open the device at `camera.path`, apply `camera.config`, keep the
    /// connection open, and apply `camera.stream_config` to its stream if set.
    async fn start_camera(&self, camera: &CameraConfig) -> Result<SourceId, AppError>;

    /// Create a virtual stream with no source selected yet.
    async fn add_switched_camera(&self, name: &str) -> Result<SwitchedId, AppError>;

    /// Point a virtual stream at a physical source.
    fn select_source(&self, switched: SwitchedId, source: SourceId) -> Result<(), AppError>;
}
