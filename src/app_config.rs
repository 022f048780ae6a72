use crate::camera_config::{CameraConfig, SwitchedCameraConfig};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Well-known location of the rig descriptor on the co-processor image.
pub const DEFAULT_CONFIG_PATH: &str = "/boot/frc.json";

/// How long the main task sleeps between idle ticks once everything is up.
pub const IDLE_INTERVAL: Duration = Duration::from_secs(10);

/// Network-state role of this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NtMode {
    #[default]
    Client,
    Server,
}

impl NtMode {
    /// Case-insensitive match against `client` / `server`.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("client") {
            Some(NtMode::Client)
        } else if value.eq_ignore_ascii_case("server") {
            Some(NtMode::Server)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NtMode::Client => "client",
            NtMode::Server => "server",
        }
    }
}

impl fmt::Display for NtMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable snapshot of the rig descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub team: u32,
    pub mode: NtMode,
    pub cameras: Vec<CameraConfig>,
    pub switched_cameras: Vec<SwitchedCameraConfig>,
}

impl Configuration {
    /// Renders the snapshot back into the descriptor format, so that loading
    /// the result yields an equal `Configuration`.
    pub fn to_json(&self) -> serde_json::Value {
        let cameras: Vec<_> = self.cameras.iter().map(CameraConfig::to_json).collect();
        let switched: Vec<_> = self
            .switched_cameras
            .iter()
            .map(SwitchedCameraConfig::to_json)
            .collect();
        serde_json::json!({
            "team": self.team,
            "ntmode": self.mode,
            "cameras": cameras,
            "switched cameras": switched,
        })
    }
}
